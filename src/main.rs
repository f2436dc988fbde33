#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging, AutoCommander, CliCommander, Commander, FleetPreset, InMemoryTransport,
    MatchConfig, MatchResult, PeerNode, Role, TcpTransport, Transport, UdpTransport,
    DEFAULT_GRID_SIZE, DEFAULT_READ_TIMEOUT, HUMAN_READ_TIMEOUT,
};

#[cfg(feature = "std")]
use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use tokio::net::{TcpListener, UdpSocket};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Two-player naval battle over a 2-byte wire protocol", long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum PlayerType {
    Human,
    Auto,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[cfg(feature = "std")]
enum TransportKind {
    Tcp,
    Udp,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct MatchArgs {
    #[arg(long, value_enum, default_value_t = TransportKind::Tcp)]
    transport: TransportKind,
    #[arg(long, value_enum, default_value_t = PlayerType::Human)]
    player: PlayerType,
    #[arg(long, value_enum, default_value_t = FleetPreset::Standard)]
    fleet: FleetPreset,
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE, help = "Grid edge length (1-10)")]
    grid_size: u8,
    #[arg(
        long,
        help = "Seconds to wait for the opponent; 0 waits forever [default: 120 with --player auto, 1800 with --player human]"
    )]
    read_timeout: Option<u64>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Disable ANSI colours")]
    no_color: bool,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Let two automatic commanders play each other in-process.
    Local {
        #[arg(long, value_enum, default_value_t = FleetPreset::Standard)]
        fleet: FleetPreset,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Wait for an opponent to connect. The host moves first.
    Host {
        #[arg(long, default_value = "0.0.0.0:5000")]
        bind: String,
        #[command(flatten)]
        args: MatchArgs,
    },
    /// Connect to a waiting host.
    Join {
        #[arg(long, default_value = "127.0.0.1:5000")]
        connect: String,
        #[command(flatten)]
        args: MatchArgs,
    },
}

#[cfg(feature = "std")]
fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

/// `None` means no deadline. Without an explicit value a human player gets
/// the long timeout, since either side may be typing.
#[cfg(feature = "std")]
fn read_timeout(player: PlayerType, secs: Option<u64>) -> Option<Duration> {
    match (secs, player) {
        (Some(0), _) => None,
        (Some(secs), _) => Some(Duration::from_secs(secs)),
        (None, PlayerType::Human) => Some(HUMAN_READ_TIMEOUT),
        (None, PlayerType::Auto) => Some(DEFAULT_READ_TIMEOUT),
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { fleet, seed } => {
            println!("Starting local match between two automatic commanders...");
            if let Some(s) = seed {
                println!("Using fixed seed: {} (match will be reproducible)", s);
            }
            let mut rng1 = make_rng(seed);
            let mut rng2 = make_rng(seed.map(|s| s.wrapping_add(1)));
            let host = MatchConfig::new(Role::Acceptor)
                .with_fleet(fleet)
                .with_read_timeout(None);
            let guest = MatchConfig::new(Role::Initiator)
                .with_fleet(fleet)
                .with_read_timeout(None);

            let (t1, t2) = InMemoryTransport::pair();
            let mut node1 = PeerNode::prepare(
                &host,
                Box::new(AutoCommander::new(fleet)),
                Box::new(t1),
                &mut rng1,
            )?;
            let mut node2 = PeerNode::prepare(
                &guest,
                Box::new(AutoCommander::new(fleet)),
                Box::new(t2),
                &mut rng2,
            )?;

            let (r1, r2) = tokio::join!(node1.run(&mut rng1), node2.run(&mut rng2));
            let winner = match (r1, r2) {
                (MatchResult::Win, _) => "player 1",
                (_, MatchResult::Win) => "player 2",
                _ => "nobody",
            };
            println!(
                "Winner: {} (player 1 fired {} shots, player 2 fired {})",
                winner,
                node1.shots_fired(),
                node2.shots_fired()
            );
        }
        Commands::Host { bind, args } => {
            let transport: Box<dyn Transport> = match args.transport {
                TransportKind::Tcp => {
                    let listener = TcpListener::bind(&bind).await?;
                    println!("Waiting for an opponent on {} (tcp)...", bind);
                    let (stream, addr) = listener.accept().await?;
                    println!("Opponent connected from {}", addr);
                    Box::new(TcpTransport::new(stream))
                }
                TransportKind::Udp => {
                    let socket = UdpSocket::bind(&bind).await?;
                    println!("Waiting for an opponent on {} (udp)...", bind);
                    let udp = UdpTransport::accept(socket).await?;
                    println!("Opponent connected from {}", udp.peer_addr());
                    Box::new(udp)
                }
            };
            play(Role::Acceptor, &args, transport).await?;
        }
        Commands::Join { connect, args } => {
            println!("Connecting to {}...", connect);
            let transport: Box<dyn Transport> = match args.transport {
                TransportKind::Tcp => Box::new(TcpTransport::connect(&connect).await?),
                TransportKind::Udp => Box::new(UdpTransport::connect(&connect).await?),
            };
            println!("Connected successfully!");
            play(Role::Initiator, &args, transport).await?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn play(role: Role, args: &MatchArgs, transport: Box<dyn Transport>) -> anyhow::Result<()> {
    if let Some(s) = args.seed {
        println!("Using fixed seed: {} (match will be reproducible)", s);
    }
    let config = MatchConfig::new(role)
        .with_fleet(args.fleet)
        .with_grid_size(args.grid_size)
        .with_read_timeout(read_timeout(args.player, args.read_timeout));
    let mut rng = make_rng(args.seed);
    let commander: Box<dyn Commander> = match args.player {
        PlayerType::Human => Box::new(CliCommander::new(args.fleet, !args.no_color)),
        PlayerType::Auto => Box::new(AutoCommander::new(args.fleet)),
    };
    let mut node = PeerNode::prepare(&config, commander, transport, &mut rng)?;
    let result = node.run(&mut rng).await;
    if !matches!(args.player, PlayerType::Human) {
        println!("Match over: {:?} after {} shots", result, node.shots_fired());
    }
    Ok(())
}
