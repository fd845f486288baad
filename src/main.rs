use stress_test::{stress_test_hash_set, stress_test_scaling, stress_test_sorted_set};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let rt = tokio::runtime::Runtime::new().expect("failed to start tokio runtime");
    let converged = rt.block_on(async_main());
    if !converged {
        std::process::exit(1);
    }
}

async fn async_main() -> bool {
    let mut converged = true;

    println!("\n\n╔════════════════════════════════════════════════════════════╗");
    println!("║            HOST → FOLLOWER REPLICATION                      ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    // Test 1: hash-backed set, small scale
    let stats = stress_test_hash_set(4, 200, 10).await;
    stats.print();
    converged &= stats.converged;

    // Test 2: ordered set, small scale
    let stats = stress_test_sorted_set(4, 200, 10).await;
    stats.print();
    converged &= stats.converged;

    // Test 3: hash-backed set, medium scale
    let stats = stress_test_hash_set(10, 1000, 50).await;
    stats.print();
    converged &= stats.converged;

    // Test 4: ordered set, medium scale
    let stats = stress_test_sorted_set(10, 1000, 50).await;
    stats.print();
    converged &= stats.converged;

    // Test 5: Scaling analysis
    converged &= stress_test_scaling(20, 4).await;

    if converged {
        println!("\n✓ All followers converged with their host!");
    } else {
        println!("\n✗ At least one follower diverged; see warnings above");
    }
    converged
}
