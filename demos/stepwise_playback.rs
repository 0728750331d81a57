//! Steps a simulation round by round, the way a viewer would.
//!
//! Run with `cargo run --example stepwise_playback -- <input>`.
//! Set `RUST_LOG=debug` to see the run driver's log output.

use fsasim::analysis::nondeterministic_states;
use fsasim::{automaton, FiniteAutomaton, Simulator, Trace};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let input = std::env::args().nth(1).unwrap_or_else(|| "-0x1f".to_string());

    // Signed decimal or hexadecimal integers.
    let nfa = automaton! {
        states: [start, signed, zero, hex, dec, done],
        initial: start,
        final: [done],
        transitions: [
            start -> signed : "[+,-]",
            start -> signed : "",
            signed -> zero : "0",
            zero -> hex : "[x,X]",
            hex -> hex : "[0..9,a..f,A..F]",
            hex -> done : "",
            signed -> dec : "[0..9]",
            dec -> dec : "[0..9]",
            dec -> done : "",
        ],
    }?;

    let nondeterministic: Vec<String> = nondeterministic_states(&nfa)
        .into_iter()
        .map(|id| nfa.state_name(id).into_owned())
        .collect();
    println!("Nondeterministic states: {}", nondeterministic.join(", "));

    for simulator in [
        Simulator::step_by_state(&nfa),
        Simulator::step_with_closure(&nfa),
    ] {
        println!("\n== {} on {input:?} ==", simulator.policy());
        for round in simulator.start(&input) {
            let frontier: Vec<String> = round
                .frontier
                .iter()
                .map(|config| {
                    format!(
                        "{}:{:?}",
                        nfa.state_name(config.current_state()),
                        config.remaining_input()
                    )
                })
                .collect();
            let marker = if round.accepting { " *" } else { "" };
            println!("round {:>2}: [{}]{marker}", round.index, frontier.join(", "));
        }

        let trace = Trace::record(&simulator, &input);
        println!("verdict: {:?}", trace.verdict);
        for path in trace.accepting_paths() {
            let names: Vec<String> = path
                .iter()
                .map(|&id| nfa.state_name(id).into_owned())
                .collect();
            println!("path: {}", names.join(" -> "));
        }
    }

    Ok(())
}
