// src/cli.rs
use std::{env, path::PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::config::{consts::DEFAULT_CONFIG_FILE, Config};
use crate::progress::{ConsoleProgress, Progress};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub config: PathBuf,          // config.json location
    pub out: Option<PathBuf>,     // overrides sheet_path
    pub seen: Option<PathBuf>,    // overrides seen_links_path
    pub max: Option<usize>,       // overrides max_jobs_per_source
    pub dry_run: bool,            // scrape and report, write nothing
    pub verbose: bool,            // debug logging
    pub help: bool,
}

impl Params {
    pub fn new() -> Self {
        Self {
            config: PathBuf::from(DEFAULT_CONFIG_FILE),
            out: None,
            seen: None,
            max: None,
            dry_run: false,
            verbose: false,
            help: false,
        }
    }

    /// Flags win over the config file.
    pub fn apply(&self, mut cfg: Config) -> Config {
        if let Some(out) = &self.out { cfg.sheet_path = out.clone(); }
        if let Some(seen) = &self.seen { cfg.seen_links_path = seen.clone(); }
        if let Some(max) = self.max { cfg.max_jobs_per_source = max; }
        cfg
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run() -> Result<()> {
    let params = parse_args(env::args().skip(1))?;
    if params.help {
        eprintln!("{}", include_str!("cli_help.txt"));
        return Ok(());
    }

    crate::log::init(params.verbose);
    let cfg = params.apply(Config::load(&params.config));
    logd!("Effective config: {cfg:?}");

    let mut progress = ConsoleProgress;
    if params.dry_run {
        progress.log("Dry run: nothing will be written");
    }
    crate::runner::run(&cfg, params.dry_run, Some(&mut progress))
        .wrap_err_with(|| format!("writing to {}", cfg.sheet_path.display()))?;
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Params>
where
    I: IntoIterator<Item = String>,
{
    let mut params = Params::new();
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str() {
            "-c" | "--config" => {
                params.config = PathBuf::from(args.next().ok_or_else(|| eyre!("Missing value for --config"))?)
            }
            "-o" | "--out" => {
                params.out = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing output path"))?))
            }
            "--seen" => {
                params.seen = Some(PathBuf::from(args.next().ok_or_else(|| eyre!("Missing value for --seen"))?))
            }
            "-m" | "--max" => {
                let v = args.next().ok_or_else(|| eyre!("Missing value for --max"))?;
                let n: usize = v.trim().parse().wrap_err_with(|| format!("Invalid --max: {v}"))?;
                params.max = Some(n);
            }
            "--dry-run" => params.dry_run = true,
            "-v" | "--verbose" => params.verbose = true,
            "-h" | "--help" => params.help = true,
            _ => return Err(eyre!("Unknown arg: {a}")),
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Params> {
        parse_args(args.iter().map(|a| s!(*a)))
    }

    #[test]
    fn no_args_means_defaults() {
        assert_eq!(parse(&[]).unwrap(), Params::new());
    }

    #[test]
    fn flags_override_config() {
        let p = parse(&["--out", "x/jobs.csv", "--seen", "x/seen.txt", "-m", "3", "--dry-run"]).unwrap();
        assert!(p.dry_run);
        let cfg = p.apply(Config::default());
        assert_eq!(cfg.sheet_path, PathBuf::from("x/jobs.csv"));
        assert_eq!(cfg.seen_links_path, PathBuf::from("x/seen.txt"));
        assert_eq!(cfg.max_jobs_per_source, 3);
    }

    #[test]
    fn bad_args_are_errors() {
        assert!(parse(&["--max"]).is_err());
        assert!(parse(&["--max", "lots"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
    }
}
