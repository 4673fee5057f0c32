//! Diagnostic: read an IGES file, print what was found, and check that a
//! write/read roundtrip reproduces the same entities.
//!
//! Usage: `diag_iges <file.igs>`; set `RUST_LOG=igesrust=debug` for reader traces.

use anyhow::{bail, Context, Result};
use igesrust::entities::EntityType;
use igesrust::{IgesFile, IgesReader, IgesWriter};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        bail!("usage: diag_iges <file.igs>");
    };

    let file = IgesReader::from_file(&path)
        .and_then(|reader| reader.read())
        .with_context(|| format!("failed to read {path}"))?;

    print_globals(&file);
    print_entities(&file);

    if !file.notifications.is_empty() {
        println!("\n--- Notifications ({}) ---", file.notifications.len());
        for notification in file.notifications.iter() {
            println!("  {notification}");
        }
    }

    let bytes = IgesWriter::new(&file)
        .write_to_vec()
        .context("failed to write file back")?;
    let reread = IgesReader::from_reader(bytes.as_slice())
        .and_then(|reader| reader.read())
        .context("failed to read written output")?;

    println!("\n--- Roundtrip ---");
    if reread.entities == file.entities {
        println!("  OK  {} entities, {} bytes", reread.entities.len(), bytes.len());
    } else {
        println!(
            "  FAIL  read {} entities, roundtrip produced {}",
            file.entities.len(),
            reread.entities.len()
        );
        std::process::exit(1);
    }
    Ok(())
}

fn print_globals(file: &IgesFile) {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    println!("--- Global ---");
    println!("  delimiters:   '{}' '{}'", file.field_delimiter, file.record_delimiter);
    println!("  product:      {}", text(&file.identification));
    println!("  file name:    {}", text(&file.full_file_name));
    println!(
        "  system:       {} {}",
        text(&file.system_identifier),
        text(&file.system_version)
    );
    println!("  units:        {:?} (scale {})", file.model_units, file.model_space_scale);
    println!("  version:      {:?}", file.iges_version);
    println!("  created:      {}", file.timestamp);
    println!("  modified:     {}", file.modified_time);
    println!("  author:       {} / {}", text(&file.author), text(&file.organization));
}

fn print_entities(file: &IgesFile) {
    println!("\n--- Entities ({}) ---", file.entities.len());
    for (index, entity) in file.entities.iter().enumerate() {
        let common = entity.common();
        let transform = if common.transform.is_identity() { "" } else { " transformed" };
        let detail = match entity {
            EntityType::Line(line) => {
                let (p1, p2) = line.world_points();
                format!("{p1} -> {p2} ({:?})", line.bounding)
            }
            EntityType::CircularArc(arc) => format!(
                "center {} radius {:.6}{}",
                arc.world_center(),
                arc.radius(),
                if arc.is_full_circle() { " (full circle)" } else { "" }
            ),
            EntityType::Location(location) => format!("{}", location.world_point()),
            EntityType::TransformationMatrix(matrix) => format!("{:?}", matrix.matrix),
        };
        println!(
            "  {:>4}  {:<22} color={}{}  {}",
            index + 1,
            entity.as_entity().entity_type(),
            common.color,
            transform,
            detail
        );
    }
}
