//! fgbin CLI - Command-line tool for FaceGen binary files.
//!
//! This is the main entry point for the fgbin command-line application.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use fgbin::prelude::*;
use fgbin::table;

/// fgbin - FaceGen binary file conversion and slider editing tool
#[derive(Parser)]
#[command(name = "fgbin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert face descriptors (.fg) to a CSV file
    FgToCsv {
        /// Input files or glob patterns
        #[arg(required = true)]
        inputs: Vec<String>,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write one face descriptor (.fg) per CSV row
    CsvToFg {
        /// Input CSV file (filename, SS x 50, SA x 30, TS x 50)
        #[arg(short, long)]
        input: PathBuf,

        /// Directory the row file names are relative to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Export shape and texture sliders of a control file to CSV
    CtlToCsv {
        /// Control file
        #[arg(short, long, env = "FGBIN_CTL")]
        ctl: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Only export these labels (repeatable)
        #[arg(long = "control")]
        controls: Vec<String>,
    },

    /// Insert CSV rows (label, GS x 50, TS x 50) into a control file
    CsvToCtl {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Control file to update
        #[arg(short, long, env = "FGBIN_CTL")]
        ctl: PathBuf,
    },

    /// List slider labels of a control file
    CtlList {
        /// Control file
        #[arg(short, long, env = "FGBIN_CTL")]
        ctl: PathBuf,

        /// Only list one category (GS, GA, TS, TA)
        #[arg(short, long)]
        kind: Option<SliderKind>,
    },

    /// Insert a slider orthogonal to an existing one
    CtlOrthogonal {
        /// Control file to update
        #[arg(short, long, env = "FGBIN_CTL")]
        ctl: PathBuf,

        /// Slider to be orthogonal to
        first: String,

        /// Slider to orthogonalize
        second: String,

        /// Label for the new slider
        #[arg(short, long)]
        label: Option<String>,

        /// Slider category
        #[arg(short, long, default_value = "GS")]
        kind: SliderKind,
    },

    /// Insert a face descriptor's symmetric shape as a slider
    CtlInsertFg {
        /// Control file to update
        #[arg(short, long, env = "FGBIN_CTL")]
        ctl: PathBuf,

        /// Face descriptor
        #[arg(short, long)]
        fg: PathBuf,

        /// Label for the new slider
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Show a summary of a triangle mesh (.tri)
    TriInfo {
        /// Input TRI file
        input: PathBuf,
    },

    /// Show a summary of an expression geometry file (.egm)
    EgmInfo {
        /// Input EGM file
        input: PathBuf,
    },

    /// Print any supported file as JSON
    Dump {
        /// Input file (.fg, .ctl, .tri or .egm)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::FgToCsv { inputs, output } => {
            cmd_fg_to_csv(&inputs, &output)?;
        }
        Commands::CsvToFg { input, output } => {
            cmd_csv_to_fg(&input, &output)?;
        }
        Commands::CtlToCsv { ctl, output, controls } => {
            cmd_ctl_to_csv(&ctl, &output, &controls)?;
        }
        Commands::CsvToCtl { input, ctl } => {
            cmd_csv_to_ctl(&input, &ctl)?;
        }
        Commands::CtlList { ctl, kind } => {
            cmd_ctl_list(&ctl, kind)?;
        }
        Commands::CtlOrthogonal {
            ctl,
            first,
            second,
            label,
            kind,
        } => {
            cmd_ctl_orthogonal(&ctl, kind, &first, &second, label.as_deref())?;
        }
        Commands::CtlInsertFg { ctl, fg, label } => {
            cmd_ctl_insert_fg(&ctl, &fg, label.as_deref())?;
        }
        Commands::TriInfo { input } => {
            cmd_tri_info(&input)?;
        }
        Commands::EgmInfo { input } => {
            cmd_egm_info(&input)?;
        }
        Commands::Dump { input } => {
            cmd_dump(&input)?;
        }
    }

    Ok(())
}

fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// Expand glob patterns; arguments without matches are kept as literal paths.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let before = paths.len();
        for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern {pattern}"))? {
            paths.push(entry?);
        }
        if paths.len() == before {
            paths.push(PathBuf::from(pattern));
        }
    }
    Ok(paths)
}

fn write_csv(output: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut text = String::new();
    for row in rows {
        text.push_str(&table::format_row(row));
        text.push('\n');
    }
    fs::write(output, text).context("Failed to write CSV file")
}

fn cmd_fg_to_csv(inputs: &[String], output: &Path) -> Result<()> {
    let paths = expand_inputs(inputs)?;
    println!("Converting {} face descriptors...", paths.len());

    let pb = progress_bar(paths.len())?;
    let start = Instant::now();
    let mut rows = Vec::with_capacity(paths.len());
    let mut errors = 0;

    for path in &paths {
        match FaceDescriptor::open(path) {
            Ok(face) => {
                let name = path.with_extension("");
                rows.push(table::descriptor_row(&name.to_string_lossy(), &face));
            }
            Err(e) => {
                eprintln!("Error reading {}: {}", path.display(), e);
                errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    write_csv(output, &rows)?;
    println!(
        "Wrote {} rows to {} in {:?} ({} errors)",
        rows.len(),
        output.display(),
        start.elapsed(),
        errors
    );

    Ok(())
}

fn cmd_csv_to_fg(input: &Path, output: &Path) -> Result<()> {
    let text = fs::read_to_string(input).context("Failed to read CSV file")?;
    let rows = table::read_rows(&text);
    println!("Writing {} face descriptors...", rows.len());

    let pb = progress_bar(rows.len())?;
    let start = Instant::now();
    let mut written = 0;
    let mut errors = 0;

    for (line, fields) in &rows {
        let result = table::parse_descriptor_row(fields).map_err(anyhow::Error::from).and_then(|row| {
            let mut path = output.join(&row.name);
            if path.extension().is_none() {
                path.set_extension("fg");
            }
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            row.to_descriptor().write(&path)?;
            debug!(path = %path.display(), "wrote face descriptor");
            Ok(())
        });

        match result {
            Ok(()) => written += 1,
            Err(e) => {
                eprintln!("Error on line {}: {}", line, e);
                errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!(
        "Wrote {} files in {:?} ({} errors)",
        written,
        start.elapsed(),
        errors
    );

    Ok(())
}

fn cmd_ctl_to_csv(ctl_path: &Path, output: &Path, controls: &[String]) -> Result<()> {
    println!("Loading control vectors from {}...", ctl_path.display());
    let ctl = ControlFile::open(ctl_path).context("Failed to read control file")?;

    let shapes = labelled_weights(&ctl, SliderKind::GeometrySymmetric, controls);
    let textures = labelled_weights(&ctl, SliderKind::TextureSymmetric, controls);

    let rows: Vec<_> = textures
        .iter()
        .filter_map(|(label, texture)| {
            shapes
                .get(label)
                .map(|shape| table::slider_row(label, shape, texture))
        })
        .collect();

    write_csv(output, &rows)?;
    println!("Wrote {} sliders to {}", rows.len(), output.display());

    Ok(())
}

/// Weights of one category by label, restricted to `controls` when given.
fn labelled_weights<'a>(
    ctl: &'a ControlFile,
    kind: SliderKind,
    controls: &[String],
) -> BTreeMap<String, &'a [f32]> {
    ctl.sliders(kind)
        .iter()
        .map(|s| (s.label_str(), s.weights.as_slice()))
        .filter(|(label, _)| controls.is_empty() || controls.contains(label))
        .collect()
}

fn cmd_csv_to_ctl(input: &Path, ctl_path: &Path) -> Result<()> {
    let text = fs::read_to_string(input).context("Failed to read CSV file")?;
    let rows = table::read_rows(&text);
    println!("Inserting {} slider pairs into {}...", rows.len(), ctl_path.display());

    let pb = progress_bar(rows.len())?;
    let mut inserted = 0;
    let mut errors = 0;

    for (line, fields) in &rows {
        let result = table::parse_slider_row(fields)
            .and_then(|row| fgbin::insert_slider_row(ctl_path, &row));
        match result {
            Ok(()) => inserted += 1,
            Err(e) => {
                eprintln!("Error on line {}: {}", line, e);
                errors += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!("Inserted {} slider pairs ({} errors)", inserted, errors);

    Ok(())
}

fn cmd_ctl_list(ctl_path: &Path, kind: Option<SliderKind>) -> Result<()> {
    let ctl = ControlFile::open(ctl_path).context("Failed to read control file")?;

    let mut count = 0;
    for (slider_kind, slider) in ctl.iter_sliders() {
        if kind.is_some_and(|k| k != slider_kind) {
            continue;
        }
        println!("{} {}", slider_kind, slider.label_str());
        count += 1;
    }

    println!("\nTotal: {} sliders", count);

    Ok(())
}

fn cmd_ctl_orthogonal(
    ctl_path: &Path,
    kind: SliderKind,
    first: &str,
    second: &str,
    label: Option<&str>,
) -> Result<()> {
    let inserted = insert_orthogonal_slider(ctl_path, kind, first, second, label)
        .context("Failed to insert orthogonal slider")?;

    println!("{} added to control file: {}", inserted.label, ctl_path.display());

    Ok(())
}

fn cmd_ctl_insert_fg(ctl_path: &Path, fg_path: &Path, label: Option<&str>) -> Result<()> {
    let label = fgbin::insert_slider_from_fg(ctl_path, fg_path, label)
        .context("Failed to insert slider from face descriptor")?;

    println!("{} added to control file: {}", label, ctl_path.display());

    Ok(())
}

fn cmd_tri_info(input: &Path) -> Result<()> {
    let mesh = TriMesh::open(input).context("Failed to read TRI file")?;

    println!("Magic: {}", String::from_utf8_lossy(&mesh.magic));
    println!(
        "Vertices: {} (+{} extra)",
        mesh.vertex_count(),
        mesh.extra_vertex_count
    );
    println!("Triangles: {}, quads: {}", mesh.triangles.len(), mesh.quads.len());
    println!(
        "Labels: {} vertex, {} surface",
        mesh.vertex_labels.len(),
        mesh.surface_labels.len()
    );
    if !mesh.texture_coords.is_empty() {
        println!(
            "Texture coordinates: {} ({} indexed faces)",
            mesh.texture_coords.len(),
            mesh.triangle_texture_indices.len() + mesh.quad_texture_indices.len()
        );
    }

    println!("Morphs: {}", mesh.morphs.len());
    for morph in &mesh.morphs {
        println!("  {}", morph.label_str());
    }
    if mesh.stat_morph_count > 0 || !mesh.trailing.is_empty() {
        println!(
            "Stat morphs: {} ({} unparsed bytes)",
            mesh.stat_morph_count,
            mesh.trailing.len()
        );
    }

    Ok(())
}

fn cmd_egm_info(input: &Path) -> Result<()> {
    let egm = ExpressionGeometry::open(input).context("Failed to read EGM file")?;

    println!("Vertices: {}", egm.vertex_count);
    println!("Geometry basis version: {}", egm.geometry_basis_version);
    println!(
        "Modes: {} symmetric, {} asymmetric",
        egm.symmetric.len(),
        egm.asymmetric.len()
    );

    Ok(())
}

fn cmd_dump(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;

    let json = if data.starts_with(fgbin::fg::FG_MAGIC) {
        serde_json::to_string_pretty(&FaceDescriptor::parse(&data)?)?
    } else if data.starts_with(fgbin::ctl::CTL_MAGIC) {
        serde_json::to_string_pretty(&ControlFile::parse(&data)?)?
    } else if data.starts_with(fgbin::tri::TRI_MAGIC_PREFIX) {
        serde_json::to_string_pretty(&TriMesh::parse(&data)?)?
    } else if data.starts_with(fgbin::egm::EGM_MAGIC) {
        serde_json::to_string_pretty(&ExpressionGeometry::parse(&data)?)?
    } else {
        anyhow::bail!("Input file is not a FaceGen .fg, .ctl, .tri or .egm file");
    };

    println!("{}", json);

    Ok(())
}
