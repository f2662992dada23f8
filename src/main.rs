use anyhow::{Context, Result};
use cc_powerline::config::{self, Charset, DirectoryStyle, DisplayStyle, SegmentSettings};
use cc_powerline::providers::{gather_facts, HookData};
use cc_powerline::segments::SegmentKind;
use cc_powerline::utils::{debug, warn};
use cc_powerline::{render, Terminal};
use pico_args::Arguments;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
struct Args {
    theme: Option<String>,
    style: Option<DisplayStyle>,
    charset: Option<Charset>,
    config: Option<PathBuf>,
    width: Option<usize>,
    help: bool,
    basename: bool,
}

impl Args {
    fn from_env() -> Result<Self> {
        let mut args = Arguments::from_env();

        let parsed = Self {
            help: args.contains(["-h", "--help"]),
            basename: args.contains("--basename"),
            theme: args.opt_value_from_str("--theme")?,
            style: args.opt_value_from_str("--style")?,
            charset: args.opt_value_from_str("--charset")?,
            config: args.opt_value_from_str("--config")?,
            width: args.opt_value_from_str("--width")?,
        };

        let rest = args.finish();
        if !rest.is_empty() {
            warn(&format!("Ignoring unknown arguments: {:?}", rest));
        }
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    let args = Args::from_env()?;

    if args.help {
        print_help();
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(run(args));
    // A provider that outlived its timeout must not hold the process open.
    runtime.shutdown_timeout(Duration::from_millis(100));

    println!("{}", result?);
    Ok(())
}

async fn run(args: Args) -> Result<String> {
    let mut config = config::load_config(args.config).await?;

    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    if let Some(style) = args.style {
        config.display.style = style;
    }
    if let Some(charset) = args.charset {
        config.display.charset = charset;
    }
    if args.basename {
        for line in &mut config.display.lines {
            if let Some(SegmentSettings::Directory(dir)) = line.segments.get_mut(SegmentKind::Directory) {
                dir.style = DirectoryStyle::Basename;
            }
        }
    }

    let hook = HookData::from_stdin().unwrap_or_else(|e| {
        warn(&format!("Could not read hook input: {:#}", e));
        HookData::default()
    });
    debug(&format!("hook: {:?}", hook));

    let terminal = Terminal::detect(args.width);
    let facts = gather_facts(&hook, &config).await;

    Ok(render(&facts, &config, &terminal)?)
}

fn print_help() {
    println!("cc-powerline - themed powerline statusline for Claude Code");
    println!();
    println!("USAGE:");
    println!("    cc-powerline [OPTIONS] < hook.json");
    println!();
    println!("OPTIONS:");
    println!("    --theme <THEME>        dark, light, nord, tokyo-night, rose-pine, custom [default: dark]");
    println!("    --style <STYLE>        minimal, powerline, capsule [default: minimal]");
    println!("    --charset <CHARSET>    unicode, text [default: unicode]");
    println!("    --config <FILE>        Config file path");
    println!("    --width <COLUMNS>      Terminal width used for auto-wrap [default: $COLUMNS]");
    println!("    --basename             Show only the directory name");
    println!("    -h, --help             Show this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    CC_POWERLINE_THEME     Override theme");
    println!("    CC_POWERLINE_STYLE     Override style");
    println!("    CC_POWERLINE_CONFIG    Config file path");
    println!("    CC_POWERLINE_DEBUG     Enable debug logging on stderr");
    println!("    CLAUDE_CONFIG_DIR      Claude data directories, comma separated");
}
