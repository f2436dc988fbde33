use broadside::{
    AutoCommander, FleetPreset, InMemoryTransport, MatchConfig, MatchResult, PeerNode, Role,
};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let fleet = FleetPreset::Standard;
    let host = MatchConfig::new(Role::Acceptor).with_read_timeout(None);
    let guest = MatchConfig::new(Role::Initiator).with_read_timeout(None);
    let (t1, t2) = InMemoryTransport::pair();

    let mut n1 = PeerNode::prepare(&host, Box::new(AutoCommander::new(fleet)), Box::new(t1), &mut rng1)?;
    let mut n2 = PeerNode::prepare(&guest, Box::new(AutoCommander::new(fleet)), Box::new(t2), &mut rng2)?;

    let (r1, r2) = tokio::join!(n1.run(&mut rng1), n2.run(&mut rng2));

    let winner = match (r1, r2) {
        (MatchResult::Win, MatchResult::Loss) => Some("player1"),
        (MatchResult::Loss, MatchResult::Win) => Some("player2"),
        _ => None,
    };

    let result = json!({
        "player1": n1.summary(),
        "player2": n2.summary(),
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
