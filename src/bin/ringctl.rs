use clap::{Parser, Subcommand, ValueEnum};
use progress_ring::sys::server::SOCKET_PATH;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "ringctl", version, about = "Control a running progress-ring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control socket of the running progress-ring
    #[arg(short = 's', long, default_value = SOCKET_PATH)]
    socket: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Set the progress value; anything outside 0-100 is clamped
    Progress {
        #[arg(allow_negative_numbers = true)]
        value: i64,
    },
    /// Set where the arc starts: 0-3 or top, right, bottom, left
    Location { location: String },
    /// Turn the stroke reveal animation on or off
    Animate {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Show or hide the percentage label
    Label {
        #[arg(value_enum)]
        state: Switch,
    },
    /// Reload the config file
    Reload,
}

impl Switch {
    fn as_str(&self) -> &'static str {
        match self {
            Switch::On => "on",
            Switch::Off => "off",
        }
    }
}

impl Commands {
    fn to_line(&self) -> String {
        match self {
            Commands::Progress { value } => format!("progress {}", value),
            Commands::Location { location } => format!("location {}", location),
            Commands::Animate { state } => format!("animate {}", state.as_str()),
            Commands::Label { state } => format!("label {}", state.as_str()),
            Commands::Reload => "reload".to_string(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    // reject what the ring would only log and drop
    let line = cli.command.to_line();
    if let Err(e) = line.parse::<progress_ring::events::AppEvent>() {
        anyhow::bail!("Invalid command '{}': {}", line, e);
    }

    send_command(&cli.socket, &line)
}

fn send_command(socket: &str, line: &str) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(socket).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to progress-ring at {}: {}. Is it running?",
            socket,
            e
        )
    })?;

    writeln!(stream, "{}", line)?;
    log::debug!("Sent '{}' to {}", line, socket);
    Ok(())
}
