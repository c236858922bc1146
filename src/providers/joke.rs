//! Built-in jokes

use rand::seq::SliceRandom;

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs.",
    "There are only 10 kinds of people in this world: those who know binary and those who don't.",
    "A SQL query walks into a bar, walks up to two tables and asks, can I join you?",
    "Why did the developer go broke? Because he used up all his cache.",
    "How many programmers does it take to change a light bulb? None, that's a hardware problem.",
    "Why do Java developers wear glasses? Because they don't C sharp.",
    "I would tell you a UDP joke, but you might not get it.",
    "Debugging is like being the detective in a crime movie where you are also the murderer.",
    "The best thing about a boolean is that even if you are wrong, you are only off by a bit.",
    "Knock knock. Race condition. Who's there?",
    "An accountant's favorite exercise? Balance sheets.",
    "Why did the spreadsheet break up with the calculator? It felt taken for granted.",
];

/// Pick a random joke
#[must_use]
pub fn tell_joke() -> &'static str {
    JOKES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("I'm out of jokes for now.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joke_comes_from_list() {
        for _ in 0..20 {
            assert!(JOKES.contains(&tell_joke()));
        }
    }
}
