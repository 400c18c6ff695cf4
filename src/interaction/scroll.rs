/// Script scrolling the window down by `viewports` viewport heights and
/// evaluating to the new `scrollY`. Negative values scroll up.
pub fn scroll_viewports_js(viewports: f64) -> String {
    format!(
        "(window.scrollBy({{ left: 0, top: window.innerHeight * {}, behavior: 'instant' }}), window.scrollY)",
        viewports
    )
}
