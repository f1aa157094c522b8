use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "Flowdesk utilities - trunk must be installed")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[command(about = "Run the frontend dev server")]
    Serve,
    #[command(about = "Build the frontend for release")]
    Dist,
}
