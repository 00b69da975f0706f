use clap::Parser;
use miette::Result;
use pcat::cli::logging::{init_logging, LogConfig};
use pcat::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Terminate quietly when stdout is closed early (`pcat proj list | head`)
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&LogConfig::from_flags(global.verbose, global.quiet));

    match cli.command {
        Commands::Init(args) => pcat::cli::commands::init::run(args, &global),
        Commands::Dim(cmd) => pcat::cli::commands::dim::run(cmd, &global),
        Commands::Dest(cmd) => pcat::cli::commands::dest::run(cmd, &global),
        Commands::Proj(cmd) => pcat::cli::commands::proj::run(cmd, &global),
        Commands::Export(cmd) => pcat::cli::commands::export::run(cmd, &global),
        Commands::Import(args) => pcat::cli::commands::import::run(args, &global),
        Commands::Config(cmd) => pcat::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => pcat::cli::commands::completions::run(args),
    }
}
