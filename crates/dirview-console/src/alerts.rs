//! Transient alert banners and the spinner.

use crate::dom::Element;

/// Size class used when the caller does not pick one.
pub const DEFAULT_SPINNER_SIZE: &str = "size-4";

const SPINNER_TRACK: &str =
    "M12,1A11,11,0,1,0,23,12,11,11,0,0,0,12,1Zm0,19a8,8,0,1,1,8-8A8,8,0,0,1,12,20Z";
const SPINNER_ARC: &str = "M10.14,1.16a11,11,0,0,0-9,8.92A1.59,1.59,0,0,0,2.46,12,1.52,1.52,0,0,0,4.11,10.7a8,8,0,0,1,6.66-6.61A1.42,1.42,0,0,0,12,2.69h0A1.57,1.57,0,0,0,10.14,1.16Z";

/// Which banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    /// Green banner.
    Success,
    /// Red banner.
    Error,
}

impl AlertKind {
    /// Suffix used in the banner's role and message id.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AlertKind::Success => "success",
            AlertKind::Error => "error",
        }
    }
}

/// One banner. Each `show` bumps the generation; a dismissal only hides the
/// banner if no newer message arrived since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBanner {
    kind: AlertKind,
    message: String,
    visible: bool,
    generation: u64,
}

impl AlertBanner {
    /// Hidden, empty banner.
    #[must_use]
    pub const fn new(kind: AlertKind) -> Self {
        Self {
            kind,
            message: String::new(),
            visible: false,
            generation: 0,
        }
    }

    /// Show a message; returns the generation to pass to [`Self::dismiss`].
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.message = message.into();
        self.visible = true;
        self.generation += 1;
        self.generation
    }

    /// Hide the banner if `generation` is still the current one.
    pub fn dismiss(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.visible = false;
        true
    }

    /// Current message text.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true while the banner is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// `div[role="alert-…"]` with the `#alert-message-…` element inside.
    #[must_use]
    pub fn render(&self) -> Element {
        let (frame, icon) = match self.kind {
            AlertKind::Success => (
                "relative w-full overflow-hidden rounded-md border border-green-500 bg-white text-neutral-600",
                "text-green-500",
            ),
            AlertKind::Error => (
                "relative w-full overflow-hidden rounded-md border border-red-500 bg-white text-neutral-600",
                "text-red-500",
            ),
        };
        let kind = self.kind.as_str();

        let mut banner = Element::new("div")
            .with_class(frame)
            .with_attr("role", format!("alert-{kind}"))
            .with_child(
                Element::new("div")
                    .with_class("flex w-full items-center gap-2 p-4")
                    .with_child(
                        Element::new("div")
                            .with_class(&format!("rounded-full p-1 {icon}"))
                            .with_attr("aria-hidden", "true"),
                    )
                    .with_child(
                        Element::new("p")
                            .with_id(format!("alert-message-{kind}"))
                            .with_class("text-xs font-medium sm:text-sm")
                            .with_text(self.message.clone()),
                    ),
            );
        if !self.visible {
            banner.set_attr("hidden", "");
        }
        banner
    }
}

/// Spinner SVG with id `spinner-{id}`, hidden until a caller un-hides it.
#[must_use]
pub fn spinner(id: &str, size: Option<&str>) -> Element {
    let size = size.unwrap_or(DEFAULT_SPINNER_SIZE);
    Element::new("svg")
        .with_attr("xmlns", "http://www.w3.org/2000/svg")
        .with_attr("viewBox", "0 0 24 24")
        .with_attr("aria-hidden", "true")
        .with_class(&format!(
            "{size} fill-neutral-600 motion-safe:animate-spin dark:fill-neutral-300 hidden"
        ))
        .with_id(format!("spinner-{id}"))
        .with_child(
            Element::new("path")
                .with_attr("d", SPINNER_TRACK)
                .with_attr("opacity", ".25"),
        )
        .with_child(Element::new("path").with_attr("d", SPINNER_ARC))
}
