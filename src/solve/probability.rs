//! Classical probability by counting: coins, a die, a deck of cards.

use std::sync::LazyLock;

use num_bigint::BigInt;
use num_traits::One;
use regex::Regex;

use crate::expr::Rational;
use crate::format::show_rational;

use super::{Answer, Certificate, ErrorKind, SolveError, SolveOutcome, SolverResult};

static COIN_TOSSES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"coin.*?(\d+)\s*(times|tosses|flips)").unwrap());

/// Tosses beyond this make the sample space unreasonably large to print.
const MAX_TOSSES: u32 = 10_000;

const DIE_FACES: u32 = 6;
const DECK_SIZE: u32 = 52;

/// Outcome counts for one recognized experiment.
struct Count {
    steps: Vec<String>,
    favorable: BigInt,
    total: BigInt,
}

pub fn solve(text: &str) -> SolveOutcome {
    let lowered = text.to_lowercase();
    let count = if let Some(caps) = COIN_TOSSES.captures(&lowered) {
        let tosses = caps
            .get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|n| *n <= MAX_TOSSES)
            .ok_or_else(|| SolveError::new(ErrorKind::Engine, "too many coin tosses to count"))?;
        coin(&lowered, tosses)
    } else if lowered.contains("dice") || lowered.contains("die") {
        die(&lowered)
    } else if lowered.contains("card") || lowered.contains("deck") {
        cards(&lowered)
    } else {
        return Ok(SolverResult::new(
            vec!["Could not recognize probability type".to_string()],
            Answer::NotAvailable,
        ));
    };
    Ok(finish(count))
}

fn coin(text: &str, tosses: u32) -> Count {
    let mut steps = vec![format!("Coin tossed {tosses} times")];
    if text.contains("all heads") || text.contains("only heads") {
        steps.push("Favorable outcome: all heads".to_string());
    } else if text.contains("all tails") || text.contains("only tails") {
        steps.push("Favorable outcome: all tails".to_string());
    } else {
        steps.push("Assuming one specific outcome".to_string());
    }
    Count {
        steps,
        favorable: BigInt::one(),
        total: num_traits::pow(BigInt::from(2), tosses as usize),
    }
}

fn die(text: &str) -> Count {
    let (step, favorable) = if text.contains('6') {
        ("Favorable outcome: getting 6", 1)
    } else if text.contains("even") {
        ("Favorable outcomes: 2,4,6", 3)
    } else if text.contains("odd") {
        ("Favorable outcomes: 1,3,5", 3)
    } else {
        ("Assuming one specific outcome", 1)
    };
    Count {
        steps: vec!["Single die rolled".to_string(), step.to_string()],
        favorable: BigInt::from(favorable),
        total: BigInt::from(DIE_FACES),
    }
}

fn cards(text: &str) -> Count {
    let (step, favorable) = if text.contains("ace") {
        ("Favorable outcomes: 4 aces", 4)
    } else if text.contains("king") {
        ("Favorable outcomes: 4 kings", 4)
    } else if text.contains("red") {
        ("Favorable outcomes: 26 red cards", 26)
    } else {
        ("Assuming one specific card", 1)
    };
    Count {
        steps: vec!["Standard deck of 52 cards".to_string(), step.to_string()],
        favorable: BigInt::from(favorable),
        total: BigInt::from(DECK_SIZE),
    }
}

fn finish(count: Count) -> SolverResult {
    let Count {
        mut steps,
        favorable,
        total,
    } = count;
    // Totals are 2^n, 6 or 52, never zero. `Rational::new` reduces.
    let probability = Rational::new(favorable.clone(), total.clone());
    steps.push(format!("Probability = {}", show_rational(&probability)));
    SolverResult::new(steps, Answer::Probability(probability))
        .certified(Certificate::Probability { favorable, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(text: &str) -> String {
        solve(text).expect("counted").final_answer.to_string()
    }

    #[test]
    fn coin_needs_a_toss_count() {
        assert_eq!(answer("A coin is flipped 5 times; probability of only tails?"), "1/32");
        // Without a count the coin rule does not fire and nothing else matches.
        assert_eq!(answer("probability a coin lands heads"), "N/A");
    }

    #[test]
    fn die_checks_six_before_parity() {
        assert_eq!(answer("Probability of rolling an even 6 on a die"), "1/6");
        assert_eq!(answer("probability of an odd number on a die"), "1/2");
    }

    #[test]
    fn cards_reduce_to_lowest_terms() {
        assert_eq!(answer("probability of drawing an ace from a deck"), "1/13");
        assert_eq!(answer("probability of drawing a red card"), "1/2");
        assert_eq!(answer("probability of drawing the queen of spades card"), "1/52");
    }
}
