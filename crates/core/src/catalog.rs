//! Static experiment catalog.
//!
//! The nine experiments and the completion rewards are fixed reference
//! data. Progress slots refer to catalog entries by [`ExperimentId`].

use crate::id::ExperimentId;

/// One experiment in the programme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Experiment {
    /// Catalog id, 1-based
    pub id: ExperimentId,
    /// Short title
    pub title: &'static str,
    /// One-paragraph summary
    pub description: &'static str,
    /// Daily steps
    pub instructions: &'static [&'static str],
    /// Length of the experiment
    pub duration: &'static str,
    /// Position in the 27-day programme
    pub days_range: &'static str,
    /// Theme
    pub category: &'static str,
    /// Daily time commitment
    pub estimated_time: &'static str,
}

/// A reward granted once all experiments are completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    /// Short title
    pub title: &'static str,
    /// What it contains
    pub description: &'static str,
}

const EXPERIMENTS: [Experiment; 9] = [
    Experiment {
        id: ExperimentId::new(1),
        title: "Mindful Breathing",
        description: "Practice conscious breathing for 5 minutes daily to increase awareness and create a foundation for all other self-improvement work.",
        instructions: &[
            "Find a quiet place to sit comfortably",
            "Set a timer for 5 minutes",
            "Focus solely on your breath, in and out",
            "When your mind wanders, gently return to your breath",
            "Log your experience in the daily tracker",
        ],
        duration: "3 days",
        days_range: "Day 1-3",
        category: "Mindfulness",
        estimated_time: "5 min/day",
    },
    Experiment {
        id: ExperimentId::new(2),
        title: "Cold Exposure",
        description: "End your shower with 30 seconds of cold water to boost resilience and activate your body's adaptive response systems.",
        instructions: &[
            "Take your regular warm shower",
            "At the end, turn the water to cold",
            "Stay under cold water for 30 seconds",
            "Focus on your breathing during exposure",
            "Record your experience and feelings",
        ],
        duration: "3 days",
        days_range: "Day 4-6",
        category: "Physical",
        estimated_time: "30 sec/day",
    },
    Experiment {
        id: ExperimentId::new(3),
        title: "Digital Detox",
        description: "Spend 1 hour each day completely disconnected from devices to reclaim your attention and mental clarity.",
        instructions: &[
            "Choose a consistent 1-hour time slot",
            "Turn off all devices and put them away",
            "Engage in analog activities (reading, walking, etc.)",
            "Notice any urges to check devices",
            "Reflect on the experience afterwards",
        ],
        duration: "3 days",
        days_range: "Day 7-9",
        category: "Mental",
        estimated_time: "1 hour/day",
    },
    Experiment {
        id: ExperimentId::new(4),
        title: "Gratitude Practice",
        description: "Write down 3 things you're grateful for each morning to shift your mindset toward abundance and positivity.",
        instructions: &[
            "Keep a notebook by your bed",
            "Upon waking, write 3 specific things you're grateful for",
            "Be detailed and specific in your gratitude",
            "Feel the emotion behind each item",
            "Review your entries at the end of 3 days",
        ],
        duration: "3 days",
        days_range: "Day 10-12",
        category: "Emotional",
        estimated_time: "5 min/day",
    },
    Experiment {
        id: ExperimentId::new(5),
        title: "Movement Meditation",
        description: "Practice slow, mindful movement for 10 minutes daily to connect mind and body through conscious motion.",
        instructions: &[
            "Find a quiet space where you can move freely",
            "Start with simple stretches or yoga poses",
            "Move slowly and deliberately",
            "Focus on how each movement feels",
            "End with 2 minutes of stillness",
        ],
        duration: "3 days",
        days_range: "Day 13-15",
        category: "Physical",
        estimated_time: "10 min/day",
    },
    Experiment {
        id: ExperimentId::new(6),
        title: "Mindful Eating",
        description: "Eat one meal per day in complete silence and awareness to develop a deeper relationship with food and nutrition.",
        instructions: &[
            "Choose one meal to eat mindfully",
            "Remove all distractions (phones, TV, books)",
            "Eat slowly, chewing each bite thoroughly",
            "Notice flavors, textures, and sensations",
            "Pay attention to hunger and fullness cues",
        ],
        duration: "3 days",
        days_range: "Day 16-18",
        category: "Nutrition",
        estimated_time: "20 min/day",
    },
    Experiment {
        id: ExperimentId::new(7),
        title: "Sleep Ritual",
        description: "Create a 30-minute technology-free bedtime routine to improve sleep quality and evening mindfulness.",
        instructions: &[
            "Set a consistent bedtime",
            "Turn off all screens 30 minutes before",
            "Engage in calming activities (reading, meditation)",
            "Prepare your space for optimal sleep",
            "Reflect on the day briefly before sleep",
        ],
        duration: "3 days",
        days_range: "Day 19-21",
        category: "Sleep",
        estimated_time: "30 min/day",
    },
    Experiment {
        id: ExperimentId::new(8),
        title: "Deep Connection",
        description: "Have one meaningful conversation daily without distractions to strengthen relationships and communication skills.",
        instructions: &[
            "Choose someone important in your life",
            "Put away all devices during conversation",
            "Ask deeper questions about their thoughts and feelings",
            "Listen actively without planning your response",
            "Share something meaningful about yourself",
        ],
        duration: "3 days",
        days_range: "Day 22-24",
        category: "Social",
        estimated_time: "15 min/day",
    },
    Experiment {
        id: ExperimentId::new(9),
        title: "Integration",
        description: "Reflect on your journey and design your personal practice by integrating the most impactful experiments into your life.",
        instructions: &[
            "Review notes from all previous experiments",
            "Identify which practices felt most beneficial",
            "Create a sustainable daily routine",
            "Set intentions for continuing your growth",
            "Celebrate your transformation journey",
        ],
        duration: "3 days",
        days_range: "Day 25-27",
        category: "Integration",
        estimated_time: "15 min/day",
    },
];

const REWARDS: [Reward; 4] = [
    Reward {
        title: "Beautiful completion certificate",
        description: "A personalized certificate celebrating your transformation journey",
    },
    Reward {
        title: "Full Self-Experiments Toolkit PDF",
        description: "Advanced guides and extended experiments for continued growth",
    },
    Reward {
        title: "Exclusive video playlist",
        description: "Deep-dive content and guided practices from experts",
    },
    Reward {
        title: "Advanced experiment guides",
        description: "Next-level practices to accelerate your transformation",
    },
];

/// All experiments in programme order.
pub fn experiments() -> &'static [Experiment] {
    &EXPERIMENTS
}

/// Look up an experiment by id.
pub fn experiment(id: ExperimentId) -> Option<&'static Experiment> {
    EXPERIMENTS.iter().find(|e| e.id == id)
}

/// First experiment, in programme order, whose id is not in `completed`.
pub fn next_available_experiment(completed: &[ExperimentId]) -> Option<&'static Experiment> {
    EXPERIMENTS.iter().find(|e| !completed.contains(&e.id))
}

/// Rewards unlocked by finishing the programme.
pub fn rewards() -> &'static [Reward] {
    &REWARDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EXPERIMENT_COUNT;

    #[test]
    fn test_catalog_matches_slot_ids() {
        assert_eq!(experiments().len(), EXPERIMENT_COUNT);
        for (i, exp) in experiments().iter().enumerate() {
            assert_eq!(exp.id.get() as usize, i + 1);
            assert!(!exp.instructions.is_empty());
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(experiment(ExperimentId::new(2)).unwrap().title, "Cold Exposure");
        assert!(experiment(ExperimentId::new(0)).is_none());
        assert!(experiment(ExperimentId::new(10)).is_none());
    }

    #[test]
    fn test_next_available() {
        let next = next_available_experiment(&[]).unwrap();
        assert_eq!(next.id, ExperimentId::new(1));

        let done: Vec<_> = (1..=4).map(ExperimentId::new).collect();
        assert_eq!(next_available_experiment(&done).unwrap().title, "Movement Meditation");

        let all: Vec<_> = experiments().iter().map(|e| e.id).collect();
        assert!(next_available_experiment(&all).is_none());
    }
}
