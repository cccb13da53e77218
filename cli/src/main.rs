use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use corner_mesh::prelude::*;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "corner-mesh")]
#[command(about = "Inspect polygon meshes and convert them to ASCII STL")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an .stl or .obj file to ASCII STL
    Convert {
        /// Input file path
        input: String,

        /// Output file path (.stl)
        output: String,

        /// Name written after `solid`; defaults to the output file name
        #[arg(long)]
        solid_name: Option<String>,
    },

    /// Print face and corner statistics of a mesh file
    Info {
        /// Input file path
        input: String,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { input, output, solid_name } => convert(&input, &output, solid_name),
        Command::Info { input, json } => info(&input, json),
    }
}

fn convert(input_path: &str, output_path: &str, solid_name: Option<String>) -> Result<()> {
    if io::Format::from_path(output_path) != Some(io::Format::Stl) {
        anyhow::bail!("Output file must be a .stl file");
    }

    let wrl = io::load(input_path)
        .with_context(|| format!("Failed to load '{}'", input_path))?;

    let config = stl::Config { solid_name };
    stl::save(output_path, &wrl, &config)
        .with_context(|| format!("Failed to write '{}'", output_path))?;

    log::info!("converted '{}' to '{}'", input_path, output_path);
    Ok(())
}

#[derive(Serialize)]
struct MeshInfo {
    name: String,
    num_vertices: usize,
    num_faces: usize,
    num_corners: usize,
    num_empty_faces: usize,
    /// Face size -> number of faces of that size.
    face_sizes: BTreeMap<usize, usize>,
    triangular: bool,
    normal_per_vertex: bool,
}

impl MeshInfo {
    fn new(ifs: &IndexedFaceSet, table: &CornerTable) -> Self {
        let mut face_sizes = BTreeMap::new();
        for f in 0..table.num_faces() {
            *face_sizes.entry(table.face_size(FaceIdx::from(f))).or_insert(0) += 1;
        }
        Self {
            name: ifs.get_name().to_owned(),
            num_vertices: table.num_vertices(),
            num_faces: table.num_faces(),
            num_corners: table.num_corners(),
            num_empty_faces: table.num_empty_faces(),
            face_sizes,
            triangular: table.is_triangular(),
            normal_per_vertex: ifs.get_normal_per_vertex(),
        }
    }
}

fn info(input_path: &str, json: bool) -> Result<()> {
    let wrl = io::load(input_path)
        .with_context(|| format!("Failed to load '{}'", input_path))?;

    let ifs = wrl.get_children()
        .iter()
        .filter_map(Node::as_shape)
        .find_map(|s| s.get_geometry().and_then(Geometry::as_indexed_face_set))
        .with_context(|| format!("'{}' contains no face set", input_path))?;
    let table = ifs.corner_table()
        .with_context(|| format!("'{}' has an invalid index array", input_path))?;
    let info = MeshInfo::new(ifs, &table);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("name:          {}", info.name);
    println!("vertices:      {}", info.num_vertices);
    println!("faces:         {}", info.num_faces);
    println!("corners:       {}", info.num_corners);
    println!("empty faces:   {}", info.num_empty_faces);
    println!("triangular:    {}", info.triangular);
    println!("normals:       {}", if info.normal_per_vertex { "per vertex" } else { "per face" });
    for (size, count) in &info.face_sizes {
        println!("  {} faces with {} corners", count, size);
    }
    Ok(())
}
