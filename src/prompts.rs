use rand::Rng;
use rand::seq::SliceRandom;

/// Fixed pool of journaling prompts and quotes dealt out on the journal
/// screen. Baked in at compile time; the app never mutates or reloads it.
pub const PROMPTS: [&str; 26] = [
    "What emotion are you avoiding right now, and why?",
    "Describe a moment this week when you felt small—and what you wish someone had said to you.",
    "If your pain could speak, what would it say?",
    "What is one thing your younger self would be proud of you for surviving?",
    "What do you need to hear right now that no one is saying?",
    "What would you write in a letter to your future self who has healed?",
    "What does safety feel like—in your body, your space, your relationships?",
    "What is the kindest sentence you can write to yourself right now?",
    "We delight in the beauty of the butterfly, but rarely admit the changes it has gone through to achieve that beauty. – Maya Angelou",
    "When the world pushes you to your knees, you're in the perfect position to pray. – Rumi",
    "You are not the darkness you endured. You are the light that refused to surrender.",
    "If you want to fly, you’ve got to give up the things that weigh you down. – Toni Morrison",
    "Self-love, self-respect, self-worth... there’s a reason they all start with ‘self’. You cannot find them in anyone else.",
    "Being deeply loved by someone gives you strength, while loving someone deeply gives you courage. – Lao Tzu",
    "A person's best successes come after their disappointments.",
    "Done is better than perfect.",
    "You need someone who goes out of their way to make it obvious that they want you in their life.",
    "Life isn’t about finding yourself. Life is about creating yourself.",
    "There are no accidents. – Master Oogway (Kung Fu Panda)",
    "The scroll is empty because the secret is you. You just have to believe. – Kung Fu Panda",
    "Take one breath at a time. You will find the fire inside of you. – Wim Hof",
    "Healing begins in silence. Sometimes, you need to be away from your devices and just exist.",
    "You have been chosen for a purpose. Sometimes, purpose finds you in your worst moment. – Transformers",
    "Hope is a good thing, maybe the best of things, and no good thing ever dies. – The Shawshank Redemption",
    "Your focus determines your reality. – Qui-Gon Jinn (Star Wars)",
    "I see now that the circumstances of one's birth are irrelevant. It is what you do with the gift of life that determines who you are. – Mewtwo (Pokémon)",
];

/// Subtitle shown under the banner.
pub const TAGLINE: &str =
    "Healing begins in silence. Sometimes, you need to be away from your devices and just exist.";

/// Draws one prompt uniformly at random from the pool.
pub fn pick<R: Rng>(rng: &mut R) -> &'static str {
    PROMPTS.choose(rng).copied().expect("prompt pool is non-empty")
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn pool_has_no_blank_prompts() {
        assert!(!PROMPTS.is_empty());
        assert!(PROMPTS.iter().all(|p| !p.trim().is_empty()));
    }

    #[test]
    fn every_pick_is_a_pool_member() {
        let mut rng = StdRng::seed_from_u64(0xBEEF);
        for _ in 0..1000 {
            assert!(PROMPTS.contains(&pick(&mut rng)));
        }
    }

    #[test]
    fn picks_cover_the_pool_roughly_uniformly() {
        let mut rng = StdRng::seed_from_u64(42);
        let draws = PROMPTS.len() * 1000;
        let mut counts = vec![0usize; PROMPTS.len()];
        for _ in 0..draws {
            let picked = pick(&mut rng);
            let idx = PROMPTS
                .iter()
                .position(|p| *p == picked)
                .expect("pick returns a pool member");
            counts[idx] += 1;
        }
        let expected = draws / PROMPTS.len();
        for (idx, count) in counts.iter().enumerate() {
            assert!(
                *count > expected / 2 && *count < expected * 2,
                "prompt {idx} drawn {count} times, expected around {expected}"
            );
        }
    }
}
