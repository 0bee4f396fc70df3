use leptos::prelude::*;

use notesync::route::Route;

use crate::state::AppState;

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "☁️",
        "AWS Cloud Storage",
        "Securely upload and store your notes in AWS cloud storage with enterprise-level security and reliability.",
    ),
    (
        "🔍",
        "Smart Search & Download",
        "Instantly search through your notes and download them directly from AWS cloud storage.",
    ),
    (
        "🤖",
        "AI-Powered Chatbot",
        "Interact with our intelligent chatbot for quick answers and assistance with your notes.",
    ),
];

/// Public landing page with the feature overview and sign-in entry points.
#[component]
pub fn LandingPage() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (show_about, set_show_about) = signal(false);

    let to_auth = move |_| state.navigate(Route::Auth);
    let scroll_to_features = move |_| {
        if let Some(el) = document().get_element_by_id("features") {
            el.scroll_into_view();
        }
    };

    view! {
        <div class="landing">
            <nav class="landing-nav">
                <div class="brand" on:click=move |_| state.navigate(Route::Landing)>
                    "📝 NoteSync"
                </div>
                <div class="nav-links">
                    <span class="nav-link" on:click=scroll_to_features>"Features"</span>
                    <span class="nav-link" on:click=move |_| set_show_about.set(true)>"About"</span>
                </div>
                <div class="nav-auth">
                    <button class="text-btn" on:click=to_auth>"Sign In"</button>
                    <button class="primary-btn" on:click=to_auth>"Get Started"</button>
                </div>
            </nav>

            <section class="hero">
                <h1>"Welcome to the Notes Management System"</h1>
                <p>
                    "Organize your thoughts, boost your productivity, and never forget important ideas again."
                </p>
                <button class="primary-btn" on:click=to_auth>"Get Started Now"</button>
                <div class="scroll-hint" on:click=scroll_to_features>"↓"</div>
            </section>

            <section id="features" class="features">
                <h2>"Powerful Features"</h2>
                <div class="feature-grid">
                    {FEATURES
                        .into_iter()
                        .map(|(icon, title, description)| {
                            view! {
                                <div class="feature-card">
                                    <div class="feature-icon">{icon}</div>
                                    <h3>{title}</h3>
                                    <p>{description}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </section>

            <section class="cta">
                <h2>"Ready to organize your notes?"</h2>
                <p>"Join thousands of users who have transformed their note-taking experience."</p>
                <button class="primary-btn" on:click=to_auth>"Get Started Now"</button>
            </section>

            <footer class="landing-footer">
                <span>"© 2023 Notes Management System. All rights reserved."</span>
                <span>"Privacy Policy | Terms of Service | Contact Us"</span>
            </footer>

            <Show when=move || show_about.get()>
                <div class="dialog-backdrop" on:click=move |_| set_show_about.set(false)>
                    <div class="dialog" on:click=|ev| ev.stop_propagation()>
                        <h2>"About NoteSync"</h2>
                        <p>
                            "NoteSync is a notes management system for organizing and accessing your information. Notes live in AWS cloud storage, so they stay secure, reliable, and reachable from anywhere."
                        </p>
                        <h3>"Technology Stack"</h3>
                        <ul>
                            <li>"Rust + Leptos (WebAssembly) frontend"</li>
                            <li>"REST backend with AWS S3 storage"</li>
                            <li>"Gemini-powered chatbot"</li>
                        </ul>
                        <button class="primary-btn" on:click=move |_| set_show_about.set(false)>
                            "Close"
                        </button>
                    </div>
                </div>
            </Show>
        </div>
    }
}
