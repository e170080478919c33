//! Utility functions for the popup composer.
//!
//! - **Toasts**: temporary notifications for operation feedback.
//! - **Fetching**: the initial `GET /api/popups` load.
//! - **Rasterization**: redrawing the live preview onto an offscreen canvas
//!   at 4x scale and exporting it as a PNG data URL, used both for the
//!   create payload and the local download action.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, HtmlElement, HtmlImageElement};
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::Callback;

use common::model::popup::PopupConfig;
use gloo_net::http::Request;

use super::messages::Msg;
use super::state::{BlockRect, PopupComposer as ComposerState, PreviewLayout, TextAlignment, TextBlock};

/// Export scale applied to the preview when rendering the PNG.
const RASTER_SCALE: f64 = 4.0;

/// Displays a temporary notification message at the bottom of the screen.
/// The toast removes itself after a few seconds.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}

/// Loads all stored popups; the update logic partitions them and picks the
/// initial screen.
pub fn fetch_popups(link: Scope<ComposerState>) {
    spawn_local(async move {
        match Request::get("/api/popups").send().await {
            Ok(resp) if resp.ok() => match resp.json::<Vec<PopupConfig>>().await {
                Ok(popups) => link.send_message(Msg::PopupsLoaded(popups)),
                Err(err) => link.send_message(Msg::LoadFailed(err.to_string())),
            },
            Ok(resp) => link.send_message(Msg::LoadFailed(format!(
                "Failed to load popups (status {})",
                resp.status()
            ))),
            Err(err) => link.send_message(Msg::LoadFailed(err.to_string())),
        }
    });
}

/// One text block as the rasterizer sees it.
#[derive(Clone)]
pub struct BlockSpec {
    pub text: String,
    pub color: String,
    pub font_px: f64,
    pub bold: bool,
    pub align: TextAlignment,
    pub rect: BlockRect,
}

/// Owned snapshot of everything the canvas render needs, detached from the
/// component so it can cross into the image onload closure.
#[derive(Clone)]
pub struct PreviewSpec {
    pub layout: PreviewLayout,
    pub bg_color: String,
    pub image: Option<String>,
    pub blocks: Vec<BlockSpec>,
}

pub fn preview_spec(composer: &ComposerState) -> PreviewSpec {
    let layout = composer.layout();
    let blocks = if layout.text_region().is_some() {
        TextBlock::ALL
            .iter()
            .map(|&block| {
                let (font_px, bold) = block.font();
                BlockSpec {
                    text: composer.block_text(block).to_string(),
                    color: composer.block_color(block).to_string(),
                    font_px,
                    bold,
                    align: composer.text_alignment,
                    rect: composer.rect(block),
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    PreviewSpec {
        layout,
        bg_color: composer.bg_color.clone(),
        image: composer.image.clone(),
        blocks,
    }
}

/// Renders the spec to a PNG data URL; emits `Ok` with the URL or `Err` with
/// an operator-facing reason. Every exit path emits exactly once, so callers
/// holding an in-flight guard always get to release it.
///
/// With an image present the draw has to wait for the browser to decode it,
/// so the actual work happens in the element's onload callback; a decode
/// failure fires onerror instead. Without an image the canvas is drawn
/// immediately.
pub fn rasterize(spec: PreviewSpec, on_done: Callback<Result<String, String>>) {
    match spec.image.clone() {
        Some(src) => {
            let img = match HtmlImageElement::new() {
                Ok(img) => img,
                Err(err) => {
                    gloo_console::error!("image element creation failed", err);
                    on_done.emit(Err("Failed to render the preview".to_string()));
                    return;
                }
            };
            let img_for_draw = img.clone();
            let on_load_done = on_done.clone();
            let onload = Closure::once(move || match draw(&spec, Some(&img_for_draw)) {
                Ok(url) => on_load_done.emit(Ok(url)),
                Err(err) => {
                    gloo_console::error!("preview render failed", err);
                    on_load_done.emit(Err("Failed to render the preview".to_string()));
                }
            });
            let onerror = Closure::once(move || {
                on_done.emit(Err("The uploaded image could not be decoded".to_string()));
            });
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onload.forget();
            onerror.forget();
            img.set_src(&src);
        }
        None => match draw(&spec, None) {
            Ok(url) => on_done.emit(Ok(url)),
            Err(err) => {
                gloo_console::error!("preview render failed", err);
                on_done.emit(Err("Failed to render the preview".to_string()));
            }
        },
    }
}

/// Saves an already-rendered data URL as `preview.png` via a synthetic
/// anchor click.
pub fn trigger_download(data_url: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        if let Ok(anchor) = document.create_element("a") {
            let anchor: HtmlAnchorElement = anchor.unchecked_into();
            anchor.set_href(data_url);
            anchor.set_download("preview.png");
            anchor.click();
        }
    }
}

fn draw(spec: &PreviewSpec, image: Option<&HtmlImageElement>) -> Result<String, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let (width, height) = spec.layout.canvas_size();
    canvas.set_width((width * RASTER_SCALE) as u32);
    canvas.set_height((height * RASTER_SCALE) as u32);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    ctx.scale(RASTER_SCALE, RASTER_SCALE)?;

    ctx.set_fill_style_str(&spec.bg_color);
    ctx.fill_rect(0.0, 0.0, width, height);

    if let (Some(img), Some((ix, iy, iw, ih))) = (image, spec.layout.image_region()) {
        ctx.draw_image_with_html_image_element_and_dw_and_dh(img, ix, iy, iw, ih)?;
    }

    if let Some((tx, ty, _, _)) = spec.layout.text_region() {
        for block in &spec.blocks {
            draw_text_block(&ctx, block, tx, ty)?;
        }
    }

    canvas.to_data_url_with_type("image/png")
}

fn draw_text_block(
    ctx: &CanvasRenderingContext2d,
    block: &BlockSpec,
    origin_x: f64,
    origin_y: f64,
) -> Result<(), JsValue> {
    let weight = if block.bold { "bold " } else { "" };
    ctx.set_font(&format!("{}{}px Arial, sans-serif", weight, block.font_px));
    ctx.set_fill_style_str(&block.color);
    ctx.set_text_align(block.align.as_css());

    let anchor_x = origin_x
        + match block.align {
            TextAlignment::Left => block.rect.x,
            TextAlignment::Center => block.rect.x + block.rect.width / 2.0,
            TextAlignment::Right => block.rect.x + block.rect.width,
        };
    let line_height = block.font_px * 1.25;
    let mut y = origin_y + block.rect.y + block.font_px;
    for line in wrap_lines(ctx, &block.text, block.rect.width) {
        ctx.fill_text(&line, anchor_x, y)?;
        y += line_height;
    }
    Ok(())
}

/// Greedy word wrap against the canvas text metrics.
fn wrap_lines(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            let fits = ctx
                .measure_text(&candidate)
                .map(|m| m.width() <= max_width)
                .unwrap_or(true);
            if fits || current.is_empty() {
                current = candidate;
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    lines
}
