use dioxus::prelude::*;

struct Feature {
    title: &'static str,
    body: &'static str,
}

const FEATURES: &[Feature] = &[
    Feature {
        title: "Lesson notes in minutes",
        body: "Give the subject, topic, class and duration. LessonPilot drafts a structured note you can refine.",
    },
    Feature {
        title: "Lesson plans and assessments",
        body: "Objectives, activities and evaluation laid out week by week, with matching assessment questions.",
    },
    Feature {
        title: "Ask follow-up questions",
        body: "Chat with the assistant about any generated document or regenerate it until it fits your class.",
    },
    Feature {
        title: "Export anywhere",
        body: "Download as PDF, HTML or plain text, ready to print or share with your school.",
    },
];

struct Tier {
    name: &'static str,
    price: &'static str,
    perks: &'static [&'static str],
    highlighted: bool,
}

const TIERS: &[Tier] = &[
    Tier {
        name: "Free",
        price: "₦0",
        perks: &["Lesson notes", "Follow-up chat", "PDF, HTML and text export"],
        highlighted: false,
    },
    Tier {
        name: "Basic",
        price: "₦2,500 / month",
        perks: &["Everything in Free", "Lesson plans", "Assessments"],
        highlighted: true,
    },
    Tier {
        name: "Premium",
        price: "₦5,000 / month",
        perks: &["Everything in Basic", "Priority generation", "Class, subject and topic libraries"],
        highlighted: false,
    },
];

const TESTIMONIALS: &[(&str, &str)] = &[
    ("My Sunday evenings are mine again. A week of notes takes me twenty minutes.", "Adaeze, JSS Mathematics"),
    ("The assessments follow the scheme of work closely and save our department hours.", "Mr. Bello, Head of Sciences"),
    ("We standardised lesson plans across three campuses with it.", "Mrs. Okafor, School Administrator"),
];

const FAQ: &[(&str, &str)] = &[
    (
        "Who is LessonPilot for?",
        "Teachers preparing lesson notes and plans, and school administrators who manage classes, subjects and staff.",
    ),
    (
        "Can I edit what the assistant writes?",
        "Yes. Ask follow-up questions in the document's chat or regenerate it, then export the version you like.",
    ),
    (
        "Which plan do I need for lesson plans?",
        "Lesson plans and assessments are part of the Basic and Premium plans. Lesson notes are free.",
    ),
    (
        "Is my work saved?",
        "Every generated document and its conversation is stored with your account and listed on your dashboard.",
    ),
];

/// Public marketing page.
#[component]
pub fn LandingView() -> Element {
    let mut open_faq = use_signal(|| Option::<usize>::None);

    rsx! {
        div {
            class: "landing",
            header {
                class: "landing-nav",
                span { class: "brand", "LessonPilot" }
                nav {
                    a { href: "#features", "Features" }
                    a { href: "#pricing", "Pricing" }
                    a { href: "#faq", "FAQ" }
                    Link { class: "btn btn-ghost", to: "/signin", "Sign in" }
                    Link { class: "btn btn-primary", to: "/signup", "Get started" }
                }
            }

            section {
                class: "hero",
                h1 { "Lesson notes, plans and assessments, drafted for you" }
                p { "LessonPilot turns a subject and topic into classroom-ready material so you can spend your time teaching." }
                Link { class: "btn btn-primary btn-lg", to: "/signup", "Start for free" }
            }

            section {
                id: "features",
                class: "features",
                for feature in FEATURES {
                    div {
                        class: "card",
                        h3 { "{feature.title}" }
                        p { "{feature.body}" }
                    }
                }
            }

            section {
                id: "pricing",
                class: "pricing",
                h2 { "Pricing" }
                div {
                    class: "pricing-grid",
                    for tier in TIERS {
                        div {
                            class: if tier.highlighted { "card tier highlighted" } else { "card tier" },
                            h3 { "{tier.name}" }
                            p { class: "price", "{tier.price}" }
                            ul {
                                for perk in tier.perks.iter() {
                                    li { "{perk}" }
                                }
                            }
                            Link { class: "btn btn-outline", to: "/signup", "Choose {tier.name}" }
                        }
                    }
                }
            }

            section {
                class: "testimonials",
                h2 { "What teachers say" }
                for (quote, author) in TESTIMONIALS.iter().copied() {
                    blockquote {
                        p { "“{quote}”" }
                        cite { "{author}" }
                    }
                }
            }

            section {
                id: "faq",
                class: "faq",
                h2 { "Frequently asked questions" }
                for (i, (question, answer)) in FAQ.iter().copied().enumerate() {
                    div {
                        class: "faq-item",
                        button {
                            class: "faq-question",
                            onclick: move |_| {
                                let current = open_faq();
                                open_faq.set(if current == Some(i) { None } else { Some(i) });
                            },
                            "{question}"
                        }
                        if open_faq() == Some(i) {
                            p { class: "faq-answer", "{answer}" }
                        }
                    }
                }
            }

            footer {
                class: "landing-footer",
                "© LessonPilot"
            }
        }
    }
}
