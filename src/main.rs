use betkit::{initial_state, legal, presets, HandState, Recorder, Result, Street};
use rust_decimal_macros::dec;
use strum::IntoEnumIterator;

fn print_state(state: &HandState) {
    println!("Street: {}  Pot: {}  Total pot: {}", state.street, state.pot, state.total_pot());
    println!("Stacks: {:?}", state.stacks.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    println!("Bets: {:?}", state.bets.iter().map(|b| b.to_string()).collect::<Vec<_>>());
    match state.actor_position() {
        Some(position) => {
            let flags = legal(state);
            let picks: Vec<String> = presets(state).into_iter().map(|p| p.label).collect();
            println!("Next to act: {} {:?}", position, flags);
            println!("Presets: {}", picks.join(", "));
        }
        None => println!("Hand complete"),
    }
    println!("---------------------------------");
}

fn record_hand() -> Result<()> {
    let mut recorder = Recorder::new(initial_state(6, "CO", dec!(100))?);
    println!("\nInitial state after blinds:");
    print_state(recorder.state());

    println!("\nUTG folds, HJ raises to 2.5, CO mistakenly folds.");
    recorder.fold()?;
    recorder.bet_or_raise_to(dec!(2.5))?;
    recorder.fold()?;
    print_state(recorder.state());

    println!("\nUndo the CO fold; CO 3-bets to 8 instead.");
    recorder.undo()?;
    recorder.bet_or_raise_to(dec!(8))?;
    print_state(recorder.state());

    println!("\nBTN, SB, BB fold; HJ calls.");
    for _ in 0..3 {
        recorder.fold()?;
    }
    recorder.call()?;
    print_state(recorder.state());

    println!("\nHJ checks, CO bets 6, HJ calls.");
    recorder.check()?;
    recorder.bet_or_raise_to(dec!(6))?;
    recorder.call()?;
    print_state(recorder.state());

    println!("\nTurn and river check through.");
    for _ in 0..4 {
        recorder.check()?;
    }
    print_state(recorder.state());

    println!("\nHand log:");
    for street in Street::iter() {
        println!("{}: {}", street, recorder.state().line(street));
    }
    Ok(())
}

fn main() {
    env_logger::init();
    println!("Recording a 6-max hand...");
    if let Err(e) = record_hand() {
        eprintln!("Failed to record hand: {}", e);
    }
}
