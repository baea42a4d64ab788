//! Image assets shown in the tunnel and the gallery.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageData {
    pub url: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

const fn image(url: &'static str, title: &'static str, description: &'static str) -> ImageData {
    ImageData {
        url,
        title,
        description,
    }
}

/// Tunnel tiles draw their textures from this list; order sets the initial
/// assignment only. Placeholder photos until the festival's own are served
/// from `static/assets/`.
pub const TUNNEL_IMAGES: &[ImageData] = &[
    image("https://picsum.photos/id/1015/1200/675", "Utkarsh 2025 - Glimpse 01", "Festival energy."),
    image("https://picsum.photos/id/1016/1200/675", "Utkarsh 2025 - Glimpse 02", "Crowd moments."),
    image("https://picsum.photos/id/1018/1200/675", "Utkarsh 2025 - Glimpse 03", "Stage highlights."),
    image("https://picsum.photos/id/1019/1200/675", "Utkarsh 2025 - Glimpse 04", "Event atmosphere."),
    image("https://picsum.photos/id/1022/1200/675", "Utkarsh 2025 - Glimpse 05", "Poster moments."),
    image("https://picsum.photos/id/1024/1200/675", "Utkarsh 2025 - Glimpse 06", "Live action."),
    image("https://picsum.photos/id/1025/1200/675", "Utkarsh 2025 - Glimpse 07", "Performance frame."),
    image("https://picsum.photos/id/1029/1200/675", "Utkarsh 2025 - Glimpse 08", "Audience excitement."),
    image("https://picsum.photos/id/1031/1200/675", "Utkarsh 2025 - Glimpse 09", "Festival throwback."),
    image("https://picsum.photos/id/1033/1200/675", "Utkarsh 2025 - Opening", "Kickoff spotlight."),
    image("https://picsum.photos/id/1035/1200/675", "Utkarsh 2025 - Arena", "Competitive spirit."),
    image("https://picsum.photos/id/1036/1200/675", "Utkarsh 2025 - Techo", "Tech energy."),
    image("https://picsum.photos/id/1037/1200/675", "Utkarsh 2025 - Fashion", "Style and stage."),
    image("https://picsum.photos/id/1039/1200/675", "Utkarsh 2025 - Dance", "Rhythm and motion."),
    image("https://picsum.photos/id/1040/1200/675", "Utkarsh 2025 - Music", "Sound of the festival."),
];

pub const GALLERY_IMAGES: &[ImageData] = &[
    image("https://picsum.photos/id/237/1000/600", "Project Alpha", "Immersive events."),
    image("https://picsum.photos/id/238/1000/600", "Academic Islands", "Virtual open days."),
    image("https://picsum.photos/id/239/1000/600", "Neon City", "Cyberpunk exploration."),
    image("https://picsum.photos/id/240/1000/600", "Data Viz", "Complex datasets."),
    image("https://picsum.photos/id/242/1000/600", "Sculpture", "Digital artifacts."),
];

pub const ABOUT_TITLE: &str = "ABOUT US";
pub const ABOUT_BODY: &[&str] = &[
    "We are the architects of the digital void.",
    "Exploring the boundaries between memory, space, and time.",
    "Our mission is to curate the unexplainable and",
    "visualize the impossible.",
];
pub const ABOUT_CTA: &str = "SCROLL TO VIEW ARCHIVE";
