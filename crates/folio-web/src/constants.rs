// Browser-side constants: media queries and the inline styles that keep the
// effect canvases full-viewport and click-through.

pub const FINE_POINTER_QUERY: &str = "(pointer: fine)";

// Ambient field sits behind page content, the trail above it. Neither
// canvas ever receives pointer events.
pub const NETWORK_CANVAS_STYLE: &str =
    "position:fixed;top:0;left:0;width:100vw;height:100vh;pointer-events:none;z-index:0";
pub const TRAIL_CANVAS_STYLE: &str =
    "position:fixed;top:0;left:0;width:100vw;height:100vh;pointer-events:none;z-index:9999";
