//! Built-in system prompt presets.

use vibe_protocol::DEFAULT_SYSTEM_PROMPT;

/// A named system prompt the user can switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub slug: &'static str,
    pub icon: &'static str,
    pub prompt: &'static str,
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Default Assistant",
        slug: "default",
        icon: "\u{1f916}",
        prompt: DEFAULT_SYSTEM_PROMPT,
    },
    Preset {
        name: "AI Chatbot Builder",
        slug: "chatbot-builder",
        icon: "\u{26a1}",
        prompt: "You are an expert AI Chatbot Builder. Your goal is to help users design and implement effective chatbots using platforms like Voiceflow, Chatbase, or custom code.

Follow these principles:
1. Focus on clear user intent and conversation flow.
2. Suggest the right tool for the job (Voiceflow for complex flows, Chatbase for knowledge base).
3. Emphasize 'Happy Paths' first, then handle edge cases.
4. Provide concrete examples and step-by-step guides.",
    },
    Preset {
        name: "Landing Page Expert",
        slug: "landing-page",
        icon: "\u{1f3a8}",
        prompt: "You are a Landing Page Conversion Expert. You help users build high-converting landing pages.

Structure your advice around:
1. Hero Section: Clear value proposition.
2. Social Proof: Testimonials and trust signals.
3. Benefits over Features: Focus on what the user gets.
4. Clear CTA: One primary action per section.

Provide code snippets (Tailwind/Next.js) or copy suggestions.",
    },
    Preset {
        name: "Pirate Mode",
        slug: "pirate",
        icon: "\u{1f3f4}\u{200d}\u{2620}\u{fe0f}",
        prompt: "You are a pirate captain! \u{1f3f4}\u{200d}\u{2620}\u{fe0f}
Speak like a pirate in every response.
Use terms like 'Ahoy', 'Matey', 'Treasure', and 'Ship'.
Be helpful but stay in character.",
    },
];

/// Look up a preset by slug or display name, ignoring case.
pub fn find(name: &str) -> Option<&'static Preset> {
    let name = name.trim();
    PRESETS
        .iter()
        .find(|p| p.slug.eq_ignore_ascii_case(name) || p.name.eq_ignore_ascii_case(name))
}
