use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use color_eyre::eyre::{self, WrapErr};
use color_eyre::Report;
use tput_plot::{GroupKey, PlotConfig};

const LIST_SEP: &str = ",";

fn main() -> Result<(), Report> {
    color_eyre::install()?;

    // init logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let matches = App::new("tput_plot")
        .version("0.1")
        .about("Box plots of throughput measurement logs.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("config")
                .long("config")
                .value_name("CONFIG")
                .help("JSON file with rendering settings (dpi, format, labels, baseline style); missing settings keep their defaults")
                .global(true)
                .takes_value(true),
        )
        .subcommand(
            plot_args(SubCommand::with_name("single"))
                .about("One box per window size of a single measurement log.")
                .arg(
                    Arg::with_name("input")
                        .long("input")
                        .value_name("INPUT")
                        .help("tab-separated measurement log: elapsed time (ms), bytes, window size")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(
            plot_args(SubCommand::with_name("multi"))
                .about("For each trial, the optimal window size with the stop-and-wait baseline overlaid.")
                .arg(
                    Arg::with_name("input")
                        .long("input")
                        .value_name("INPUT")
                        .help("comma-separated list of measurement logs, one per trial; the trial name is the file name without its extension")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("optimal")
                        .long("optimal")
                        .value_name("OPTIMAL")
                        .help("window size to plot for each trial")
                        .required(true)
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("baseline")
                        .long("baseline")
                        .value_name("BASELINE")
                        .help("window size of the baseline; default: the configured baseline window (1, stop-and-wait)")
                        .takes_value(true),
                ),
        )
        .get_matches();

    let config = match matches.value_of("config") {
        Some(path) => PlotConfig::load(path)?,
        None => PlotConfig::default(),
    };
    tracing::debug!("config: {:?}", config);

    match matches.subcommand() {
        ("single", Some(matches)) => single(matches, &config),
        ("multi", Some(matches)) => multi(matches, &config),
        (subcommand, _) => {
            eyre::bail!("unsupported subcommand {:?}", subcommand)
        }
    }
}

fn plot_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("output")
            .long("output")
            .value_name("OUTPUT")
            .help("image file to be created; its format is inferred from the extension unless set in the config")
            .required(true)
            .takes_value(true),
    )
    .arg(
        Arg::with_name("title")
            .long("title")
            .value_name("TITLE")
            .help("plot title; default: none")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("xlabel")
            .long("xlabel")
            .value_name("XLABEL")
            .help("x-axis label; default: from the config")
            .takes_value(true),
    )
    .arg(
        Arg::with_name("ylabel")
            .long("ylabel")
            .value_name("YLABEL")
            .help("y-axis label; default: from the config")
            .takes_value(true),
    )
}

fn single(matches: &ArgMatches<'_>, config: &PlotConfig) -> Result<(), Report> {
    let input = required(matches, "input")?;
    let output = required(matches, "output")?;
    let title = matches.value_of("title").unwrap_or_default();
    let xlabel = matches
        .value_of("xlabel")
        .unwrap_or(config.window_xlabel.as_str());
    let ylabel = matches.value_of("ylabel").unwrap_or(config.ylabel.as_str());

    let boxes =
        tput_plot::throughput_plot(input, output, title, xlabel, ylabel, config)
            .wrap_err("throughput plot")?;
    println!("{}: {} windows", output, boxes);
    Ok(())
}

fn multi(matches: &ArgMatches<'_>, config: &PlotConfig) -> Result<(), Report> {
    let inputs: Vec<_> = required(matches, "input")?
        .split(LIST_SEP)
        .filter(|input| !input.is_empty())
        .collect();
    let output = required(matches, "output")?;
    let optimal = parse_window(required(matches, "optimal")?)?;
    let baseline = match matches.value_of("baseline") {
        Some(baseline) => parse_window(baseline)?,
        None => GroupKey::numeric(config.baseline_window),
    };
    let title = matches.value_of("title").unwrap_or_default();
    let xlabel = matches
        .value_of("xlabel")
        .unwrap_or(config.trial_xlabel.as_str());
    let ylabel = matches.value_of("ylabel").unwrap_or(config.ylabel.as_str());

    let boxes = tput_plot::trial_plot(
        &inputs, output, &baseline, &optimal, title, xlabel, ylabel, config,
    )
    .wrap_err("trial plot")?;
    println!("{}: {} trials", output, boxes / 2);
    Ok(())
}

fn required<'a>(
    matches: &'a ArgMatches<'_>,
    name: &str,
) -> Result<&'a str, Report> {
    matches
        .value_of(name)
        .ok_or_else(|| eyre::eyre!("missing argument {}", name))
}

fn parse_window(window: &str) -> Result<GroupKey, Report> {
    let window = window
        .parse::<f64>()
        .wrap_err_with(|| format!("window size {:?} is not a number", window))?;
    Ok(GroupKey::numeric(window))
}
