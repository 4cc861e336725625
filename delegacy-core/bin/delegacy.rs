// bin/delegacy.rs - Delegacy terminal client
use anyhow::{bail, Context as _, Result};
use clap::{Parser, Subcommand};
use delegacy_core::prelude::*;
use delegacy_rpc::{Gateway, RemoteWallet};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "delegacy")]
#[command(about = "Delegate a cold vault wallet to a hot wallet", long_about = None)]
struct Args {
    /// Config file (.toml, .yaml or .json, including a front-end env.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wallet bridge JSON-RPC URL
    #[arg(long)]
    wallet_url: Option<String>,

    /// Block explorer base URL
    #[arg(long)]
    explorer_url: Option<String>,

    /// Program address for the wallet's network, replacing the configured one
    #[arg(long, requires = "rpc_url")]
    program_address: Option<String>,

    /// Fullnode URL for the wallet's network, replacing the configured one
    #[arg(long, requires = "program_address")]
    rpc_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log level
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show vault and delegate registry status for the connected account
    Status,

    /// Register the connected account as a vault and/or delegate
    Register {
        #[arg(long)]
        vault: bool,

        #[arg(long)]
        delegate: bool,
    },

    /// Delegate to a hot wallet
    Delegate {
        #[command(subcommand)]
        target: DelegateCommand,
    },

    /// List delegations made by the connected vault
    List,

    /// Wallet bridge connection
    Wallet {
        #[command(subcommand)]
        action: WalletCommand,
    },
}

#[derive(Subcommand, Debug)]
enum DelegateCommand {
    /// Delegate the entire wallet
    Wallet { delegate: String },

    /// Delegate one token of one contract
    Nft {
        delegate: String,

        #[arg(long)]
        contract: Option<String>,

        #[arg(long)]
        token_id: Option<String>,
    },

    /// Delegate every token of one contract
    Contract {
        delegate: String,

        #[arg(long)]
        contract: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum WalletCommand {
    Connect {
        #[arg(long, default_value = "Petra")]
        name: String,
    },
    Disconnect,
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ClientConfig::default(),
    };
    if let Some(url) = &args.wallet_url {
        config.wallet_url = url.clone();
    }
    if let Some(url) = &args.explorer_url {
        config.explorer_url = url.clone();
    }
    if let Some(ms) = args.timeout_ms {
        config.request_timeout_ms = ms;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let wallet = RemoteWallet::new(&config.wallet_url, config.request_timeout())?;

    if let Command::Wallet { action } = &args.command {
        return run_wallet(&wallet, action).await;
    }

    let network = wallet.network().await?;
    if let (Some(program_address), Some(rpc_url)) = (&args.program_address, &args.rpc_url) {
        config.set_endpoint(
            network,
            EndpointConfig {
                program_address: Address::new(program_address.as_str()),
                rpc_url: rpc_url.clone(),
            },
        );
    }

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Config validation failed: {}", e))?;

    let account = wallet.account().await?;
    match &account {
        Some(account) => tracing::info!("Wallet connected as {} on {}", account.label(), network),
        None => tracing::info!("Wallet disconnected on {}", network),
    }

    let gateway = Gateway::new(
        config.endpoint(network)?,
        Arc::new(wallet),
        config.request_timeout(),
    )?;
    let ctx = Context::new(
        Session {
            account: account.map(|a| a.address),
            network,
        },
        Arc::new(gateway),
        Arc::new(ConsoleNotifier),
        config.explorer(),
    )?;

    match args.command {
        Command::Status => status(ctx).await,
        Command::Register { vault, delegate } => register(ctx, vault, delegate).await,
        Command::Delegate { target } => delegate(ctx, target).await,
        Command::List => list(ctx).await,
        Command::Wallet { .. } => Ok(()),
    }
}

async fn run_wallet(wallet: &RemoteWallet, action: &WalletCommand) -> Result<()> {
    match action {
        WalletCommand::Connect { name } => {
            let account = wallet.connect(name).await?;
            println!("Connected: {}", account.label());
        }
        WalletCommand::Disconnect => {
            wallet.disconnect().await?;
            println!("Disconnected");
        }
        WalletCommand::Status => {
            let network = wallet.network().await?;
            match wallet.account().await? {
                Some(account) => println!("{} on {}", account.label(), network),
                None => println!("Connect Wallet ({})", network),
            }
        }
    }
    Ok(())
}

fn print_status(view: RegistrationView) {
    match view {
        RegistrationView::Disconnected => println!("Connect a wallet to see registry status"),
        RegistrationView::Loading => println!("Loading..."),
        RegistrationView::Unavailable => println!("Registry status unavailable"),
        RegistrationView::Ready(status) => {
            for registry in [Registry::Vault, Registry::Delegate] {
                let state = if status.is_registered(registry) {
                    "registered"
                } else {
                    "not registered"
                };
                println!("{} Registry: {}", registry, state);
            }
        }
    }
}

async fn status(ctx: Context) -> Result<()> {
    let shell = Shell::open(ctx, Step::Register).await;
    let Page::Register(page) = shell.page() else {
        bail!("register page is not mounted");
    };
    print_status(page.view().await);
    Ok(())
}

async fn register(ctx: Context, vault: bool, delegate: bool) -> Result<()> {
    if !vault && !delegate {
        bail!("Pick at least one of --vault or --delegate");
    }

    let shell = Shell::open(ctx, Step::Register).await;
    let Page::Register(page) = shell.page() else {
        bail!("register page is not mounted");
    };
    page.set_wants_vault(vault).await;
    page.set_wants_delegate(delegate).await;

    let receipt = page.register().await;
    let attempted = receipt.attempted();
    let failed = [receipt.delegate, receipt.vault]
        .into_iter()
        .flatten()
        .filter(|outcome| !outcome.is_submitted())
        .count();
    if failed > 0 {
        bail!("{} of {} registrations failed", failed, attempted);
    }
    Ok(())
}

async fn delegate(ctx: Context, command: DelegateCommand) -> Result<()> {
    let shell = Shell::open(ctx, Step::Delegate).await;
    let Page::Delegate(page) = shell.page() else {
        bail!("delegate page is not mounted");
    };

    let (target, fields) = match command {
        DelegateCommand::Wallet { delegate } => (
            DelegateTarget::Wallet,
            vec![(FormField::DelegateAddress, Some(delegate))],
        ),
        DelegateCommand::Nft {
            delegate,
            contract,
            token_id,
        } => (
            DelegateTarget::Nft,
            vec![
                (FormField::DelegateAddress, Some(delegate)),
                (FormField::ContractAddress, contract),
                (FormField::TokenId, token_id),
            ],
        ),
        DelegateCommand::Contract { delegate, contract } => (
            DelegateTarget::Contract,
            vec![
                (FormField::DelegateAddress, Some(delegate)),
                (FormField::ContractAddress, contract),
            ],
        ),
    };

    page.open(target).await;
    for (field, value) in fields {
        if let Some(value) = value {
            page.edit(field, value).await;
        }
    }

    match page.submit().await {
        Some(DelegationOutcome::Submitted(_)) => Ok(()),
        Some(DelegationOutcome::Failed(reason)) => bail!("Delegation failed: {}", reason),
        Some(DelegationOutcome::NotImplemented(target)) => {
            bail!("{} delegation is not available yet", target)
        }
        Some(DelegationOutcome::Disconnected) => Ok(()),
        None => bail!("No delegation form was open"),
    }
}

async fn list(ctx: Context) -> Result<()> {
    let shell = Shell::open(ctx, Step::View).await;
    let Page::View(page) = shell.page() else {
        bail!("view page is not mounted");
    };

    if page.view().await == ListingView::Disconnected {
        println!("Connect a wallet to see its delegations");
        return Ok(());
    }

    let rows = page.rows().await;
    if rows.is_empty() {
        println!("No delegations");
        return Ok(());
    }

    println!("{:<16} {:<16} {}", "Vault", "Delegate", "Type");
    for row in rows {
        println!("{:<16} {:<16} {}", row.vault, row.delegate, row.kind);
        tracing::debug!(key = %row.key, vault = %row.vault_link, delegate = %row.delegate_link);
    }
    Ok(())
}
