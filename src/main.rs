//! Command line tool turning an NMEA RMC log into a Markdown report and one
//! GPX track file per year.

#[macro_use]
extern crate log;

use chrono::Utc;
use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use env_logger::{Builder, Target};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use rmc_track::config::{DEFAULT_GPX_PREFIX, DEFAULT_REPORT};
use rmc_track::{gpx, pipeline, report, CenturyPolicy, Config, Error};

fn cli() -> Command {
    Command::new("rmc-track")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Derives a Markdown report and yearly GPX tracks from NMEA RMC sentences")
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("NMEA log to read"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .default_value(DEFAULT_REPORT)
                .value_parser(value_parser!(PathBuf))
                .help("Markdown report to write"),
        )
        .arg(
            Arg::new("gpx")
                .short('g')
                .long("gpx")
                .value_name("PREFIX")
                .default_value(DEFAULT_GPX_PREFIX)
                .help("Prefix of the track files, `_YYYY.gpx` is appended"),
        )
        .arg(
            Arg::new("author")
                .long("author")
                .value_name("NAME")
                .help("Author written into the track files"),
        )
        .arg(
            Arg::new("description")
                .long("description")
                .value_name("TEXT")
                .help("Description written into the track files"),
        )
        .arg(
            Arg::new("verify-checksum")
                .long("verify-checksum")
                .action(ArgAction::SetTrue)
                .help("Skip sentences whose checksum does not match"),
        )
        .arg(
            Arg::new("century-pivot")
                .long("century-pivot")
                .value_name("YY")
                .value_parser(value_parser!(u8).range(0..100))
                .help("Two digit years >= YY are read as 19YY instead of 20YY"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Do not list the written files"),
        )
}

fn config_from(matches: &ArgMatches) -> Config {
    let mut cfg = Config::default();
    if let Some(input) = matches.get_one::<PathBuf>("input") {
        cfg.input = input.clone();
    }
    if let Some(report) = matches.get_one::<PathBuf>("output") {
        cfg.report = report.clone();
    }
    if let Some(prefix) = matches.get_one::<String>("gpx") {
        cfg.gpx_prefix = prefix.clone();
    }
    if let Some(author) = matches.get_one::<String>("author") {
        cfg.author = author.clone();
    }
    if let Some(desc) = matches.get_one::<String>("description") {
        cfg.description = desc.clone();
    }
    cfg.verify_checksum = matches.get_flag("verify-checksum");
    if let Some(pivot) = matches.get_one::<u8>("century-pivot") {
        cfg.century = CenturyPolicy::Pivot(*pivot);
    }
    cfg
}

fn run(cfg: &Config, quiet: bool) -> Result<(), Error> {
    let input = BufReader::new(File::open(&cfg.input)?);
    let processed = pipeline::process(input, cfg.parser())?;
    let generated_at = Utc::now();

    let mut out = BufWriter::new(File::create(&cfg.report)?);
    report::render_markdown(&mut out, &processed.report, &cfg.report_title, generated_at)?;
    out.flush()?;
    info!("wrote report {}", cfg.report.display());

    let meta = cfg.track_metadata(generated_at);
    for year in processed.years.iter() {
        let filename = gpx::track_file_name(&cfg.gpx_prefix, year.year);
        let mut out = BufWriter::new(File::create(&filename)?);
        gpx::write_year(&mut out, year, &meta)?;
        out.flush()?;
        info!("wrote {} fixes of {} to {}", year.fix_count(), year.year, filename);
        if !quiet {
            println!("GPX file written: {}", filename);
        }
    }

    if !quiet {
        println!("Markdown report written: {}", cfg.report.display());
    }
    Ok(())
}

pub fn main() {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let matches = cli().get_matches();
    let cfg = config_from(&matches);
    debug!("{:?}", cfg);

    if let Err(e) = run(&cfg, matches.get_flag("quiet")) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn builds_config_from_arguments() {
        let matches = cli().get_matches_from(vec![
            "rmc-track",
            "-i",
            "log.txt",
            "-g",
            "out/track",
            "--author",
            "me",
            "--verify-checksum",
            "--century-pivot",
            "80",
        ]);
        let cfg = config_from(&matches);
        assert_eq!(cfg.input, PathBuf::from("log.txt"));
        assert_eq!(cfg.report, PathBuf::from(DEFAULT_REPORT));
        assert_eq!(cfg.gpx_prefix, "out/track");
        assert_eq!(cfg.author, "me");
        assert!(cfg.verify_checksum);
        assert_eq!(cfg.century, CenturyPolicy::Pivot(80));
    }

    #[test]
    fn input_is_required() {
        assert!(cli().try_get_matches_from(vec!["rmc-track", "-o", "x.md"]).is_err());
    }
}
