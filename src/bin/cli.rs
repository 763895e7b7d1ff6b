//! oidstore CLI
//!
//! Command-line interface for inspecting and mutating an oidstore
//! database.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use oidstore::{Config, Result, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// oidstore CLI
#[derive(Parser, Debug)]
#[command(name = "oidstore-cli")]
#[command(about = "CLI for the oidstore embedded object store")]
#[command(version)]
struct Args {
    /// Database root directory
    #[arg(short, long)]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new database
    Init {
        /// Database name (metadata line 1)
        #[arg(long, default_value = "Database Name")]
        name: String,

        /// Database description (metadata line 2)
        #[arg(long, default_value = "Database Description")]
        description: String,
    },

    /// List the clusters in the database
    Clusters,

    /// Create a cluster
    CreateCluster {
        /// The cluster name
        cluster: String,
    },

    /// Remove a cluster entirely
    RemoveCluster {
        /// The cluster name
        cluster: String,
    },

    /// Remove all objects from a cluster and reset its OID counter
    PurgeCluster {
        /// The cluster name
        cluster: String,
    },

    /// Remove every cluster from the database
    Purge,

    /// Store a payload, printing the assigned OID
    Put {
        /// The cluster name
        cluster: String,

        /// Payload (stored as UTF-8 bytes)
        value: String,
    },

    /// Fetch a payload by OID
    Get {
        /// The cluster name
        cluster: String,

        /// The object id
        oid: u64,
    },

    /// Delete an object by OID
    Del {
        /// The cluster name
        cluster: String,

        /// The object id
        oid: u64,
    },
}

fn main() -> ExitCode {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,oidstore=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // `init` is the one command that works without a connection
    if let Commands::Init { name, description } = &args.command {
        let config = Config::builder()
            .name(name.as_str())
            .description(description.as_str())
            .build();
        Store::initialize(&args.db, &config)?;
        println!("initialized {}", args.db.display());
        return Ok(());
    }

    let store = Store::open(&args.db)?;

    match args.command {
        Commands::Init { .. } => unreachable!("handled above"),
        Commands::Clusters => {
            let mut names: Vec<String> = store.clusters()?.into_iter().collect();
            names.sort();
            for name in names {
                println!("{}", name);
            }
        }
        Commands::CreateCluster { cluster } => {
            store.create_cluster(&cluster)?;
            println!("created cluster {}", cluster);
        }
        Commands::RemoveCluster { cluster } => {
            store.remove_cluster(&cluster)?;
            println!("removed cluster {}", cluster);
        }
        Commands::PurgeCluster { cluster } => {
            store.purge_cluster(&cluster)?;
            println!("purged cluster {}", cluster);
        }
        Commands::Purge => {
            store.purge_database()?;
            println!("purged database");
        }
        Commands::Put { cluster, value } => {
            let oid = store.store_object(&cluster, value.as_bytes())?;
            println!("{}", oid);
        }
        Commands::Get { cluster, oid } => {
            let bytes = store.get_object(&cluster, oid)?;
            println!("{}", String::from_utf8_lossy(&bytes));
        }
        Commands::Del { cluster, oid } => {
            store.remove_object(&cluster, oid)?;
            println!("removed {}/{}", cluster, oid);
        }
    }

    Ok(())
}
