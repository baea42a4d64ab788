use std::collections::HashSet;

use festival_viz::content::{GALLERY_IMAGES, TUNNEL_IMAGES};

#[test]
fn every_image_is_fetchable_without_local_assets() {
    // static/ ships no bitmaps, so relative URLs would 404 once served.
    for image in TUNNEL_IMAGES.iter().chain(GALLERY_IMAGES) {
        assert!(
            image.url.starts_with("https://"),
            "{} would need a file under static/",
            image.url
        );
    }
}

#[test]
fn tunnel_images_are_distinct_and_titled() {
    assert!(!TUNNEL_IMAGES.is_empty());
    let urls: HashSet<_> = TUNNEL_IMAGES.iter().map(|i| i.url).collect();
    assert_eq!(urls.len(), TUNNEL_IMAGES.len());
    assert!(TUNNEL_IMAGES.iter().all(|i| !i.title.is_empty()));
}
