// Gallery filtering and video placeholders

use crate::error::FlowError;
use crate::host::PresentationHost;
use crate::notifications::{NotificationSink, Severity};
use std::str::FromStr;
use std::time::Duration;

// Reveal stagger between consecutive visible items
pub const REVEAL_STEP: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GalleryFilter {
    #[default]
    All,
    Category(String),
}

impl GalleryFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            GalleryFilter::All => true,
            GalleryFilter::Category(wanted) => wanted == category,
        }
    }
}

impl FromStr for GalleryFilter {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(FlowError::InvalidField {
                field: "filter".to_string(),
                reason: "empty filter value".to_string(),
            }),
            "all" => Ok(GalleryFilter::All),
            category => Ok(GalleryFilter::Category(category.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub title: String,
    pub category: String,
}

impl GalleryItem {
    pub fn new(title: &str, category: &str) -> Self {
        Self {
            title: title.to_string(),
            category: category.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryVisibility {
    pub index: usize,
    pub visible: bool,
    // Only meaningful for visible items
    pub reveal_delay: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    active: GalleryFilter,
}

impl Gallery {
    pub fn new(items: Vec<GalleryItem>) -> Self {
        Self {
            items,
            active: GalleryFilter::All,
        }
    }

    pub fn active_filter(&self) -> &GalleryFilter {
        &self.active
    }

    pub fn apply(&mut self, filter: GalleryFilter) -> Vec<GalleryVisibility> {
        let visibility = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let visible = filter.matches(&item.category);
                GalleryVisibility {
                    index,
                    visible,
                    reveal_delay: if visible {
                        REVEAL_STEP * index as u32
                    } else {
                        Duration::ZERO
                    },
                }
            })
            .collect();

        tracing::debug!(?filter, "gallery filter applied");
        self.active = filter;
        visibility
    }

    // Filter button handler: parse the button value and push the result to the page
    pub fn filter_on(
        &mut self,
        value: &str,
        host: &dyn PresentationHost,
    ) -> Result<usize, FlowError> {
        let filter: GalleryFilter = value.parse()?;
        let visibility = self.apply(filter);
        host.apply_gallery(&visibility)?;
        Ok(visibility.iter().filter(|v| v.visible).count())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFormat {
    Mobile,
    Landscape,
}

impl VideoFormat {
    pub fn label(&self) -> &'static str {
        match self {
            VideoFormat::Mobile => "9:16 Mobile",
            VideoFormat::Landscape => "16:9 Landscape",
        }
    }
}

pub fn video_preview(format: VideoFormat, sink: &dyn NotificationSink) {
    sink.notify(
        &format!(
            "Video player would open here for {} format video",
            format.label()
        ),
        Severity::Info,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{RecordingHost, Region};
    use crate::notifications::RecordingNotifier;
    use test_case::test_case;

    fn sample_gallery() -> Gallery {
        Gallery::new(vec![
            GalleryItem::new("Dunes at dusk", "landscape"),
            GalleryItem::new("Kalbelia dance", "culture"),
            GalleryItem::new("Camp tents", "accommodation"),
            GalleryItem::new("Folk singers", "culture"),
        ])
    }

    #[test_case("all", 4)]
    #[test_case("culture", 2)]
    #[test_case("landscape", 1)]
    #[test_case("wildlife", 0)]
    fn test_filter_counts(value: &str, expected: usize) {
        let mut gallery = sample_gallery();
        let filter: GalleryFilter = value.parse().unwrap();
        let visible = gallery.apply(filter).iter().filter(|v| v.visible).count();
        assert_eq!(visible, expected);
    }

    #[test]
    fn test_reveal_delay_staggers_by_index() {
        let mut gallery = sample_gallery();
        let visibility = gallery.apply(GalleryFilter::Category("culture".to_string()));

        assert!(!visibility[0].visible);
        assert_eq!(visibility[0].reveal_delay, Duration::ZERO);
        assert_eq!(visibility[1].reveal_delay, Duration::from_millis(100));
        assert_eq!(visibility[3].reveal_delay, Duration::from_millis(300));
        assert_eq!(
            gallery.active_filter(),
            &GalleryFilter::Category("culture".to_string())
        );
    }

    #[test]
    fn test_filter_on_pushes_to_host() {
        let host = RecordingHost::new();
        let mut gallery = sample_gallery();

        assert_eq!(gallery.filter_on("culture", &host).unwrap(), 2);
        assert_eq!(host.snapshot().gallery.len(), 4);

        host.remove_region(Region::Gallery);
        assert!(matches!(
            gallery.filter_on("all", &host),
            Err(FlowError::HostElementMissing(_))
        ));
        assert!(gallery.filter_on(" ", &host).is_err());
    }

    #[test]
    fn test_video_preview_message() {
        let sink = RecordingNotifier::new();
        video_preview(VideoFormat::Mobile, &sink);

        let last = sink.last().unwrap();
        assert_eq!(
            last.message,
            "Video player would open here for 9:16 Mobile format video"
        );
        assert_eq!(last.severity, Severity::Info);
    }
}
