use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "questlog", version, about = "Questlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Skill tracking and practice logging
    Skill {
        #[command(subcommand)]
        action: commands::skill::SkillAction,
    },
    /// Dissertation progress
    Diss {
        #[command(subcommand)]
        action: commands::diss::DissAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// To-do list management
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// Recurring check-ins
    Checkin {
        #[command(subcommand)]
        action: commands::checkin::CheckinAction,
    },
    /// Pomodoro timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Daily health check
    Health {
        #[command(subcommand)]
        action: commands::health::HealthAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Statistics overview
    Stats,
    /// Reward pools and unlocked rewards
    Rewards,
    /// Backup, restore, and reset
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Skill { action } => commands::skill::run(action),
        Commands::Diss { action } => commands::diss::run(action),
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Todo { action } => commands::todo::run(action),
        Commands::Checkin { action } => commands::checkin::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Health { action } => commands::health::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Rewards => commands::rewards::run(),
        Commands::Data { action } => commands::data::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "questlog", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
