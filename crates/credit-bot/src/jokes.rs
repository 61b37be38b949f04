//! Built-in joke lists

use rand::seq::SliceRandom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokeCategory {
    /// Programmer jokes, for the bot itself
    Neutral,
    /// Chuck Norris facts, for self-raters
    Chuck,
}

const NEUTRAL: &[&str] = &[
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "A SQL query walks into a bar, goes up to two tables and asks: may I join you?",
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "I would tell you a UDP joke, but you might not get it.",
    "Debugging is like being the detective in a crime movie where you are also the murderer.",
    "There are two hard problems in computer science: cache invalidation, naming things, and off-by-one errors.",
    "To understand recursion, you must first understand recursion.",
    "It works on my machine. Then we'll ship your machine.",
    "A programmer's partner says: buy a loaf of bread, and if they have eggs, get a dozen. They came back with 12 loaves.",
    "Weeks of coding can save you hours of planning.",
];

const CHUCK: &[&str] = &[
    "Chuck Norris doesn't need a debugger. He just stares at the code until it confesses.",
    "Chuck Norris can compile syntax errors.",
    "Chuck Norris writes code that optimizes itself.",
    "Chuck Norris's keyboard has no Ctrl key. Chuck Norris is always in control.",
    "When Chuck Norris throws an exception, it lands across the room.",
    "Chuck Norris can divide by zero.",
    "Chuck Norris doesn't use version control. The code wouldn't dare change without him.",
    "Chuck Norris rates himself. The ledger agrees.",
    "Chuck Norris's programs never exit. They are terminated.",
    "All arrays Chuck Norris declares are of infinite size, because Chuck Norris knows no bounds.",
];

/// Every joke in a category
pub fn all(category: JokeCategory) -> &'static [&'static str] {
    match category {
        JokeCategory::Neutral => NEUTRAL,
        JokeCategory::Chuck => CHUCK,
    }
}

/// A random joke from a category
pub fn random(category: JokeCategory) -> &'static str {
    all(category)
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_comes_from_category() {
        for _ in 0..20 {
            assert!(all(JokeCategory::Chuck).contains(&random(JokeCategory::Chuck)));
            assert!(all(JokeCategory::Neutral).contains(&random(JokeCategory::Neutral)));
        }
    }

    #[test]
    fn test_chuck_jokes_mention_chuck() {
        assert!(all(JokeCategory::Chuck).iter().all(|j| j.contains("Chuck Norris")));
    }
}
