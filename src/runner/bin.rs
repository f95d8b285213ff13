use crate::auction::AuctionAllocator;
use crate::batch::{allocate_batch, solve_batch_oblivious, solve_batch_reference};
use crate::cli_utils::{Args, EngineType, Mode};
use crate::instance_utils::{create_auctions, create_knapsack_instances};
use crate::knapsack::{rotate, ObliviousSolver};
use crate::oblivious::{ClearEngine, Op, TranscriptEngine};
use anyhow::{bail, ensure, Context, Result};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

fn knapsack_protocol(args: &Args, rng: &mut StdRng) -> Result<()> {
    let instances = create_knapsack_instances(
        args.instances,
        args.num_items,
        args.capacity,
        args.max_weight,
        args.max_value,
        rng,
    )
    .with_context(|| "Failed to create knapsack instances.")?;

    info!(instances = instances.len(), "knapsack instances prepared");

    let expected = solve_batch_reference(&instances, args.threads)
        .with_context(|| "Failed to run the reference solver.")?;

    let got = match args.engine_type {
        EngineType::Clear => solve_batch_oblivious(&instances, args.threads, ClearEngine::new)
            .with_context(|| "Failed to run the oblivious solver.")?,
        EngineType::Transcript => {
            let mut transcripts = Vec::with_capacity(instances.len());
            let got = instances
                .iter()
                .map(|instance| -> Result<u64> {
                    let mut solver = ObliviousSolver::new(TranscriptEngine::new(ClearEngine::new()));
                    let res =
                        solver.solve(&instance.weights, &instance.values, instance.capacity)?;
                    transcripts.push(solver.into_engine().take_transcript());
                    Ok(res)
                })
                .collect::<Result<Vec<_>>>()
                .with_context(|| "Failed to run the oblivious solver.")?;

            check_transcripts(&transcripts)?;

            got
        }
    };

    for (i, (instance, (g, e))) in instances.iter().zip(got.iter().zip(expected.iter())).enumerate() {
        debug!(
            instance = i,
            weights = ?instance.weights,
            values = ?instance.values,
            oblivious = g,
            reference = e,
            "knapsack solved"
        );
    }

    ensure!(
        got == expected,
        "oblivious results {:?} differ from reference results {:?}",
        got,
        expected
    );

    info!(results = ?got, "knapsack results match the reference solver");

    Ok(())
}

fn rotate_protocol(args: &Args, rng: &mut StdRng) -> Result<()> {
    let n = args.num_items;

    if n == 0 {
        bail!("num_items (={}) == 0 @{}:{}", n, file!(), line!());
    }

    let mut transcripts = Vec::with_capacity(args.instances);

    for i in 0..args.instances {
        let values = (0..n).map(|_| rng.gen_range(0..=args.max_value)).collect_vec();
        // amounts beyond n exercise the modular reduction
        let k = rng.gen_range(0..(3 * n as u64));

        let mut rotated = values.clone();
        match args.engine_type {
            EngineType::Clear => rotate(&mut ClearEngine::new(), &mut rotated, &k)?,
            EngineType::Transcript => {
                let mut engine = TranscriptEngine::new(ClearEngine::new());
                rotate(&mut engine, &mut rotated, &k)?;
                transcripts.push(engine.take_transcript());
            }
        }

        let mut expected = values.clone();
        expected.rotate_left((k % n as u64) as usize);

        debug!(instance = i, k, ?values, ?rotated, "rotated");

        ensure!(
            rotated == expected,
            "rotation of {:?} by {} gave {:?}, expected {:?}",
            values,
            k,
            rotated,
            expected
        );
    }

    check_transcripts(&transcripts)?;

    info!(instances = args.instances, len = n, "rotations match plain rotation");

    Ok(())
}

fn auction_protocol(args: &Args, rng: &mut StdRng) -> Result<()> {
    let auctions = create_auctions(
        args.instances,
        args.num_items,
        args.capacity,
        args.max_value,
        args.max_weight,
        rng,
    )
    .with_context(|| "Failed to create auctions.")?;

    info!(auctions = auctions.len(), "auctions prepared");

    let winners = allocate_batch(&auctions, args.threads)
        .with_context(|| "Failed to allocate auctions.")?;

    for (i, (auction, winner)) in auctions.iter().zip(winners.iter()).enumerate() {
        let highest = auction.bidders.iter().map(|b| b.bid).max().unwrap_or(0);
        ensure!(
            winner.total_bid() >= highest as u128,
            "auction {}: winner bid {} below highest single bid {}",
            i,
            winner.total_bid(),
            highest
        );

        let optimum = AuctionAllocator::new(auction.capacity)
            .exact_optimum(&auction.bidders)
            .with_context(|| format!("Failed to compute the optimum of auction {}.", i))?;

        info!(
            auction = i,
            coalition = winner.is_coalition(),
            winners = ?winner.bidders().iter().map(|b| b.id).collect_vec(),
            total_bid = %winner.total_bid(),
            optimum = optimum.value,
            "auction allocated"
        );
    }

    Ok(())
}

fn check_transcripts(transcripts: &[Vec<Op>]) -> Result<()> {
    let Some(first) = transcripts.first() else {
        return Ok(());
    };

    if let Some(i) = transcripts.iter().position(|t| t != first) {
        bail!(
            "transcript of instance {} differs from instance 0 ({} vs {} operations)",
            i,
            transcripts[i].len(),
            first.len()
        );
    }

    let counts = first.iter().counts();
    info!(
        operations = first.len(),
        selects = counts.get(&Op::Select).copied().unwrap_or(0),
        swaps = counts.get(&Op::CondSwap).copied().unwrap_or(0),
        "all transcripts identical"
    );

    Ok(())
}

/// Run the mode selected by `args`.
pub fn run(args: Args) -> Result<()> {
    if args.threads == 0 {
        bail!("threads (={}) == 0 @{}:{}", args.threads, file!(), line!());
    }

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    info!(
        mode = %args.mode,
        engine = %args.engine_type,
        seed,
        "running"
    );

    match args.mode {
        Mode::Knapsack => knapsack_protocol(&args, &mut rng),
        Mode::Rotate => rotate_protocol(&args, &mut rng),
        Mode::Auction => auction_protocol(&args, &mut rng),
    }
}
