use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use crate::components::contact_form::ContactForm;
use crate::components::feedback_widget::FeedbackWidget;
use crate::components::hero_video::HeroVideo;
use crate::components::section_switcher::SectionSwitcher;
use crate::components::showcase::{Showcase, VideoCard, VideoSource};
use crate::components::theme_pill::ThemePill;
use crate::components::whatsapp_widget::WhatsAppWidget;
use crate::observers::Observer;
use crate::switcher::{SelectionChanged, SwitcherOption};

fn sections() -> Vec<SwitcherOption> {
    vec![
        SwitcherOption::new("home", "Home"),
        SwitcherOption::new("about", "About"),
        SwitcherOption::new("services", "Services"),
        SwitcherOption::new("work", "Work"),
        SwitcherOption::new("pricing", "Pricing"),
        SwitcherOption::new("contact", "Contact"),
    ]
}

fn showcase_cards() -> Vec<VideoCard> {
    vec![
        VideoCard { title: "Brand Story: Urban Threads", category: "brand", source: VideoSource::YouTube("dQw4w9WgXcQ") },
        VideoCard { title: "Product Launch Reel", category: "reels", source: VideoSource::File("/assets/videos/launch-reel.mp4") },
        VideoCard { title: "Wedding Highlights", category: "events", source: VideoSource::YouTube("ScMzIvxBSi4") },
        VideoCard { title: "Cafe Promo Short", category: "reels", source: VideoSource::File("/assets/videos/cafe-short.mp4") },
    ]
}

fn scroll_to_section(key: &str) {
    let Some(section) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(key))
    else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    section.scroll_into_view_with_scroll_into_view_options(&options);
}

#[function_component(Home)]
pub fn home() -> Html {
    let options = use_memo(|_| sections(), ());
    let section_in_view = use_state(|| None::<AttrValue>);
    let footer_visible = use_state(|| false);

    // Observers are attached once the whole page is in the DOM.
    {
        let section_in_view = section_in_view.clone();
        let footer_visible = footer_visible.clone();
        use_effect_with_deps(
            move |_| {
                let sections = Observer::sections(move |id| section_in_view.set(Some(id.into())));
                let footer = Observer::footer(move |visible| footer_visible.set(visible));
                move || {
                    drop(sections);
                    drop(footer);
                }
            },
            (),
        );
    }

    let on_change = Callback::from(|change: SelectionChanged| {
        log::info!("section {} -> {}", change.previous, change.key);
        if change.scrolls_page() {
            scroll_to_section(&change.key);
        }
    });

    html! {
        <>
            <header class="site-header">
                <a class="site-logo" href="#home">{ "Clipo Media" }</a>
                <SectionSwitcher
                    options={(*options).clone()}
                    initial={Some(AttrValue::from("home"))}
                    section_in_view={(*section_in_view).clone()}
                    footer_visible={*footer_visible}
                    {on_change}
                />
                <ThemePill />
            </header>

            <main>
                <section id="home" class="hero">
                    <div class="gradient-orb"></div>
                    <span class="hero__badge">{ "Video production & editing" }</span>
                    <h1 class="hero__title">{ "Stories that stop the scroll" }</h1>
                    <p class="hero__description">
                        { "Reels, brand films and event edits crafted for the feeds your customers live in." }
                    </p>
                    <div class="hero__buttons">
                        <a class="btn btn--primary" href="#contact">{ "Book a call" }</a>
                        <a class="btn btn--ghost" href="#work">{ "See our work" }</a>
                    </div>
                    <HeroVideo src="/assets/videos/showreel.mp4" poster={Some(AttrValue::from("/assets/showreel-poster.jpg"))} />
                </section>

                <section id="about" class="about">
                    <h2 class="section__title">{ "About us" }</h2>
                    <div class="about__visions">
                        <div class="vision-card">{ "Mission: make every brand camera-ready." }</div>
                        <div class="vision-card">{ "Vision: short-form video that actually converts." }</div>
                    </div>
                    <div class="about__stats">
                        <div class="stat"><strong>{ "250+" }</strong><span>{ "Projects" }</span></div>
                        <div class="stat"><strong>{ "60+" }</strong><span>{ "Brands" }</span></div>
                        <div class="stat"><strong>{ "24h" }</strong><span>{ "Response time" }</span></div>
                    </div>
                </section>

                <section id="services" class="services">
                    <h2 class="section__title">{ "Services" }</h2>
                    <div class="services__grid">
                        <div class="service-card">{ "Reels & shorts" }</div>
                        <div class="service-card">{ "Brand films" }</div>
                        <div class="service-card">{ "Event coverage" }</div>
                        <div class="service-card">{ "Colour & sound" }</div>
                    </div>
                </section>

                <section id="work" class="work">
                    <h2 class="section__title">{ "Our work" }</h2>
                    <Showcase
                        filters={vec![("all", "All"), ("reels", "Reels"), ("brand", "Brand"), ("events", "Events")]}
                        cards={showcase_cards()}
                    />
                </section>

                <section id="pricing" class="pricing">
                    <h2 class="section__title">{ "Pricing" }</h2>
                    <div class="pricing__grid">
                        <div class="pricing-card"><h3>{ "Starter" }</h3><p>{ "4 reels / month" }</p></div>
                        <div class="pricing-card"><h3>{ "Growth" }</h3><p>{ "12 reels + 1 brand film" }</p></div>
                        <div class="pricing-card"><h3>{ "Studio" }</h3><p>{ "Dedicated editor" }</p></div>
                    </div>
                    <div class="feedback-section">
                        <h2 class="section__title">{ "Rate your experience" }</h2>
                        <FeedbackWidget />
                    </div>
                </section>

                <section id="contact" class="contact">
                    <h2 class="section__title">{ "Let's talk" }</h2>
                    <ContactForm />
                </section>
            </main>

            <footer class="footer">
                <div class="footer__content">
                    <span>{ "© Clipo Media" }</span>
                </div>
            </footer>

            <WhatsAppWidget notify_at_scroll_percent={Some(60.0)} />
        </>
    }
}
