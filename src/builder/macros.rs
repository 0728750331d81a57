//! Macros for compact automaton construction.

/// Build an [`Automaton`](crate::core::Automaton) from a compact
/// declaration.
///
/// Expands to an [`AutomatonBuilder`](crate::builder::AutomatonBuilder)
/// chain and evaluates to `Result<Automaton, BuildError>`. State names are
/// the identifiers as written. Labels are any string expression; `""` is a
/// lambda transition.
///
/// # Example
///
/// ```
/// use fsasim::automaton;
///
/// let nfa = automaton! {
///     states: [q0, q1, q2],
///     initial: q0,
///     final: [q2],
///     transitions: [
///         q0 -> q1 : "",
///         q1 -> q2 : "[a..c]",
///     ],
/// }
/// .unwrap();
///
/// assert_eq!(nfa.transition_count(), 2);
/// ```
#[macro_export]
macro_rules! automaton {
    (
        states: [$($state:ident),* $(,)?],
        initial: $initial:ident,
        final: [$($final:ident),* $(,)?],
        transitions: [$($from:ident -> $to:ident : $label:expr),* $(,)?] $(,)?
    ) => {
        $crate::builder::AutomatonBuilder::new()
            $(.state(stringify!($state)))*
            .initial(stringify!($initial))
            $(.final_state(stringify!($final)))*
            $(.transition(stringify!($from), stringify!($to), $label))*
            .build()
    };
}
