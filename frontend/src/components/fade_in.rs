use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::timers::Scheduler;
use crate::view::View;
use crate::viewport::{Entry, Viewport, WatchOptions};

pub const FADE_SELECTOR: &str = ".solution-card, .feature-item, .testimonial-card, .step";

const HIDDEN_OFFSET: &str = "translateY(20px)";
const SHOWN_OFFSET: &str = "translateY(0)";
const TRANSITION: &str = "opacity 0.6s ease, transform 0.6s ease";

/// Hides every target, then fades each one in the first time it scrolls into
/// view. Targets arriving in the same batch are staggered.
pub fn observe<P, S>(
    viewport: &P,
    scheduler: S,
    targets: Vec<P::Target>,
    config: &SiteConfig,
) -> Result<(), SiteError>
where
    P: Viewport,
    P::Target: View,
    S: Scheduler,
{
    if targets.is_empty() {
        return Err(SiteError::MissingElement(FADE_SELECTOR.to_string()));
    }

    for target in &targets {
        target.set_style("opacity", "0");
        target.set_style("transform", HIDDEN_OFFSET);
        target.set_style("transition", TRANSITION);
    }

    let stagger_ms = config.fade_stagger_ms;
    let on_change = move |entries: Vec<Entry<P::Target>>| -> Vec<P::Target> {
        let mut revealed = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            if !entry.is_intersecting {
                continue;
            }
            let target = entry.target;
            let delay = stagger_ms.saturating_mul(index as u32);
            let shown = target.clone();
            let pending = scheduler.after(
                delay,
                Box::new(move || {
                    shown.set_style("opacity", "1");
                    shown.set_style("transform", SHOWN_OFFSET);
                }),
            );
            scheduler.detach(pending);
            revealed.push(target);
        }
        revealed
    };

    viewport.watch(
        targets,
        WatchOptions::threshold(config.fade_threshold).with_root_margin(&config.fade_root_margin),
        Box::new(on_change),
    )
}
