use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use hexlib::{
    render::svg::map_to_svg, timed, AxialCoord, HexMap, MapConfig, WorldPoint,
};
use log::{info, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for building hex maps and exporting their overlay data.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexlib")]
struct Opt {
    /// Path to a config file that defines the map to be built. Supported
    /// formats: JSON, TOML
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to an existing .json map file to load
    #[structopt(short, long)]
    map: Option<PathBuf>,

    /// X coordinate of the world point to center the map on. The map's grid
    /// origin will be the hex containing this point.
    #[structopt(long, allow_hyphen_values = true)]
    origin_x: Option<f64>,

    /// Y coordinate of the world point to center the map on. See
    /// `--origin-x`
    #[structopt(long, allow_hyphen_values = true)]
    origin_y: Option<f64>,

    /// If given, the map will be saved to this directory. The exact files
    /// that appear in the directory are defined by the output formats. See
    /// `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the map in. Supported formats:
    ///
    /// bin - The packed gridline buffer, 2 bytes per hex, ready to be
    ///   uploaded to a texture
    ///
    /// cfg - The full config object used for the map, in TOML format
    ///
    /// json - JSON representation of the map, plus a list of every hex in
    ///   it. Can be reloaded with `--map`
    ///
    /// svg - 2D rendering of the map
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use while building the map. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the map's gridline buffer as raw bytes
    Bin,
    /// Export the map's full config in a human-readable file
    Cfg,
    /// Export the map in a serialized JSON format, which can be deserialized
    /// later to recover the map
    Json,
    /// Render the map as a 2D SVG
    Svg,
    /* If you change this, make sure to update the help text for
     * `--output-formats`! */
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Bin => "bin",
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

/// Everything that goes into the JSON output. The map itself is enough to
/// rebuild everything, but listing the hexes saves consumers from having to
/// do any hex math.
#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    map: &'a HexMap,
    hexes: Vec<AxialCoord>,
}

fn load_config(config_path: &Path) -> anyhow::Result<MapConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate an output form of the map in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    map: &HexMap,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        map: &HexMap,
    ) -> anyhow::Result<Vec<u8>> {
        let bytes = match output_format {
            OutputFormat::Bin => {
                // Pack the gridlines, exactly as they'd be uploaded
                map.build_gridlines().to_bytes()
            }
            OutputFormat::Cfg => {
                // Serialize just the map config via toml
                toml::to_string_pretty(map.config())
                    .context("error serializing config")?
                    .into_bytes()
            }
            OutputFormat::Json => {
                let output = JsonOutput {
                    map,
                    hexes: map
                        .valid_coords(map.grid_origin())
                        .into_iter()
                        .collect(),
                };
                serde_json::to_vec(&output).context("error serializing map")?
            }
            OutputFormat::Svg => {
                // Render the map in 2D
                map_to_svg(map).to_string().into_bytes()
            }
        };
        Ok(bytes)
    }

    let output_file_path = output_dir
        .join("map")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, map)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let mut map = match &opt {
        Opt {
            config: Some(config_path),
            map: None,
            ..
        } => {
            // Load map config and use it to build a new map
            let config = load_config(config_path)?;
            HexMap::new(config)?
        }
        Opt {
            config: None,
            map: Some(input_path),
            ..
        } => {
            // Load existing map from a file
            let json = fs::read_to_string(input_path).with_context(|| {
                format!("error reading map file {:?}", input_path)
            })?;
            let map = HexMap::from_json(&json)?;
            info!("Loaded map from {:?}", input_path);
            map
        }
        _ => bail!(
            "must pass exactly one of --config (to build a new map) \
            or --map (to load an existing map)"
        ),
    };

    if opt.origin_x.is_some() || opt.origin_y.is_some() {
        let point = WorldPoint::new(
            opt.origin_x.unwrap_or_default(),
            opt.origin_y.unwrap_or_default(),
            0.0,
        );
        map.set_origin(point);
        info!("Map centered on {}", map.grid_origin());
    }

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = &opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(output_dir)?;

        for output_format in &opt.output_formats {
            gen_output(output_dir, *output_format, &map)?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}
