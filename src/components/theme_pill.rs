use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

fn apply(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

#[function_component(ThemePill)]
pub fn theme_pill() -> Html {
    let theme = use_state(|| Theme::Light);

    {
        use_effect_with_deps(
            move |theme| {
                apply(*theme);
                || ()
            },
            *theme,
        );
    }

    let onclick = {
        let theme = theme.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            theme.set(theme.toggled());
        })
    };

    html! {
        <button
            id="themePill"
            class={classes!("theme-pill", format!("theme-pill--{}", theme.as_str()))}
            aria-label="Toggle theme"
            aria-pressed={(*theme == Theme::Dark).to_string()}
            {onclick}
        >
            <span class="theme-pill__knob"></span>
        </button>
    }
}
