//! View rendering for the popup composer.
//!
//! Three screens: a spinner while the stored popups load, the configuration
//! form with its live preview surface, and the active/recent lists. The
//! preview surface and the canvas rasterizer share the same layout geometry
//! (`PreviewLayout`), so the exported PNG matches the DOM preview.

use common::model::popup::{Frequency, PopupConfig, Weekday};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{DragKind, PopupComposer, Screen, TextBlock};

pub fn view(component: &PopupComposer, ctx: &Context<PopupComposer>) -> Html {
    let link = ctx.link();
    match component.screen {
        Screen::Loading => html! {
            <div class="composer-loading"><div class="spinner"></div></div>
        },
        Screen::Form => html! {
            <div class="composer">
                { form_section(component, link) }
                { preview_section(component, link) }
            </div>
        },
        Screen::List => list_section(component, link),
    }
}

fn form_section(component: &PopupComposer, link: &Scope<PopupComposer>) -> Html {
    let on_heading = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::UpdateHeading(input.value())
    });
    let on_body = link.callback(|e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        Msg::UpdateBody(input.value())
    });
    let on_footer = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::UpdateFooter(input.value())
    });
    let on_frequency = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::SetFrequency(select.value())
    });
    let on_file = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input
            .files()
            .and_then(|files| files.get(0))
            .map(Msg::FileSelected)
    });

    html! {
        <div class="form-panel">
            <h2>{"Configure Popup"}</h2>

            <input
                type="text"
                class="form-input"
                placeholder="Heading"
                value={component.heading.clone()}
                oninput={on_heading}
            />
            <textarea
                class="form-input"
                placeholder="Body"
                rows="2"
                value={component.body_text.clone()}
                oninput={on_body}
            />
            <input
                type="text"
                class="form-input"
                placeholder="Footer"
                value={component.footer_text.clone()}
                oninput={on_footer}
            />

            <div class="form-row">
                <input type="file" accept="image/*" onchange={on_file} />
                {
                    if component.image.is_some() {
                        html! {
                            <button class="btn-small" onclick={link.callback(|_| Msg::RemoveImage)}>
                                {"Remove image"}
                            </button>
                        }
                    } else {
                        html! {}
                    }
                }
                <label class="toggle-label">
                    <input
                        type="checkbox"
                        checked={component.only_image}
                        onchange={link.callback(|_| Msg::ToggleOnlyImage)}
                        disabled={component.image.is_none()}
                    />
                    {"Image only"}
                </label>
            </div>

            <select class="form-input" onchange={on_frequency}>
                {
                    for Frequency::ALL.iter().map(|freq| html! {
                        <option
                            value={freq.as_str()}
                            selected={*freq == component.frequency}
                        >
                            { freq.label() }
                        </option>
                    })
                }
            </select>

            {
                if component.frequency == Frequency::Repeatedly {
                    let on_minutes = link.callback(|e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        Msg::SetTimeFrequency(input.value())
                    });
                    html! {
                        <input
                            type="number"
                            class="form-input"
                            placeholder="Time in minutes"
                            value={component.time_frequency.map(|m| m.to_string()).unwrap_or_default()}
                            oninput={on_minutes}
                        />
                    }
                } else {
                    html! {}
                }
            }

            {
                if component.frequency == Frequency::OnDay {
                    let on_day = link.callback(|e: Event| {
                        let select: HtmlSelectElement = e.target_unchecked_into();
                        Msg::SetOnDay(select.value())
                    });
                    html! {
                        <select class="form-input" onchange={on_day}>
                            {
                                for Weekday::ALL.iter().map(|day| html! {
                                    <option
                                        value={day.as_str()}
                                        selected={*day == component.on_day}
                                    >
                                        { day.label() }
                                    </option>
                                })
                            }
                        </select>
                    }
                } else {
                    html! {}
                }
            }

            <div class="form-actions">
                <button class="btn-cancel" onclick={link.callback(|_| Msg::CancelForm)}>
                    {"Cancel"}
                </button>
                <button
                    class="btn-send"
                    disabled={component.submitting}
                    onclick={link.callback(|_| Msg::Submit)}
                >
                    { if component.submitting { "Sending..." } else { "Send" } }
                </button>
            </div>
        </div>
    }
}

fn preview_section(component: &PopupComposer, link: &Scope<PopupComposer>) -> Html {
    html! {
        <div class="preview-panel">
            { preview_tools(component, link) }
            <p class="preview-tip">
                {"Tip: Drag the texts to place them in your preferred position."}
            </p>
            { preview_surface(component, link) }
        </div>
    }
}

fn preview_tools(component: &PopupComposer, link: &Scope<PopupComposer>) -> Html {
    html! {
        <div class="preview-tools">
            { color_tool("B", &component.bg_color, link.callback(Msg::SetBgColor)) }
            { color_tool("H", &component.heading_color, link.callback(Msg::SetHeadingColor)) }
            { color_tool("P", &component.body_color, link.callback(Msg::SetBodyColor)) }
            { color_tool("F", &component.footer_color, link.callback(Msg::SetFooterColor)) }
            <button
                class="tool-btn"
                title="Cycle text alignment"
                onclick={link.callback(|_| Msg::CycleTextAlignment)}
            >
                { format!("Align: {}", component.text_alignment.as_css()) }
            </button>
            <button
                class="tool-btn"
                title="Cycle image position"
                onclick={link.callback(|_| Msg::CycleImagePosition)}
                disabled={component.image.is_none() || component.only_image}
            >
                { format!("Image: {}", component.image_position.label()) }
            </button>
            <button
                class="tool-btn"
                title="Download preview"
                onclick={link.callback(|_| Msg::DownloadPreview)}
            >
                {"Download"}
            </button>
        </div>
    }
}

fn color_tool(label: &'static str, value: &str, on_change: Callback<String>) -> Html {
    let onchange = Callback::from(move |e: Event| {
        if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            on_change.emit(input.value());
        }
    });
    html! {
        <label class="color-tool" style={format!("background-color:{};", value)}>
            { label }
            <input type="color" value={value.to_string()} onchange={onchange} class="color-input" />
        </label>
    }
}

fn preview_surface(component: &PopupComposer, link: &Scope<PopupComposer>) -> Html {
    let layout = component.layout();
    let (width, height) = layout.canvas_size();
    let onmousemove = link.callback(|e: MouseEvent| Msg::DragMove {
        x: e.client_x() as f64,
        y: e.client_y() as f64,
    });

    html! {
        <div
            class="preview-surface"
            style={format!(
                "position:relative;width:{}px;height:{}px;background-color:{};",
                width, height, component.bg_color
            )}
            onmousemove={onmousemove}
            onmouseup={link.callback(|_| Msg::DragEnd)}
            onmouseleave={link.callback(|_| Msg::DragEnd)}
        >
            { image_pane(component) }
            { text_pane(component, link) }
        </div>
    }
}

fn image_pane(component: &PopupComposer) -> Html {
    match (&component.image, component.layout().image_region()) {
        (Some(src), Some((x, y, w, h))) => html! {
            <img
                src={src.clone()}
                alt="Uploaded"
                style={format!(
                    "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;object-fit:cover;",
                    x, y, w, h
                )}
            />
        },
        _ => html! {},
    }
}

fn text_pane(component: &PopupComposer, link: &Scope<PopupComposer>) -> Html {
    let Some((x, y, w, h)) = component.layout().text_region() else {
        return html! {};
    };
    html! {
        <div
            class="text-pane"
            style={format!(
                "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;",
                x, y, w, h
            )}
        >
            { for TextBlock::ALL.iter().map(|&block| text_block(component, link, block)) }
        </div>
    }
}

fn text_block(component: &PopupComposer, link: &Scope<PopupComposer>, block: TextBlock) -> Html {
    let rect = component.rect(block);
    let (font_px, bold) = block.font();
    let dragging = matches!(component.drag, Some(d) if d.block == block);

    let on_move_down = link.callback(move |e: MouseEvent| {
        e.prevent_default();
        Msg::DragStart {
            block,
            kind: DragKind::Move,
            x: e.client_x() as f64,
            y: e.client_y() as f64,
        }
    });
    let on_resize_down = link.callback(move |e: MouseEvent| {
        e.prevent_default();
        e.stop_propagation();
        Msg::DragStart {
            block,
            kind: DragKind::Resize,
            x: e.client_x() as f64,
            y: e.client_y() as f64,
        }
    });

    html! {
        <div
            class={classes!("text-block", dragging.then_some("dragging"))}
            style={format!(
                "position:absolute;left:{}px;top:{}px;width:{}px;height:{}px;\
                 font-size:{}px;font-weight:{};color:{};text-align:{};",
                rect.x, rect.y, rect.width, rect.height,
                font_px,
                if bold { "bold" } else { "normal" },
                component.block_color(block),
                component.text_alignment.as_css(),
            )}
            onmousedown={on_move_down}
        >
            { component.block_text(block) }
            <div class="resize-handle" onmousedown={on_resize_down}></div>
        </div>
    }
}

fn list_section(component: &PopupComposer, link: &Scope<PopupComposer>) -> Html {
    html! {
        <div class="popup-lists">
            <button class="btn-add" onclick={link.callback(|_| Msg::ShowForm)}>
                {"Add +"}
            </button>

            <div class="popup-list">
                <h3>{"Active Popups"}</h3>
                {
                    if component.active_popups.is_empty() {
                        html! { <p>{"No active popups"}</p> }
                    } else {
                        html! {
                            <ul>
                                { for component.active_popups.iter().map(|p| popup_card(link, p, true)) }
                            </ul>
                        }
                    }
                }
            </div>

            <div class="popup-list">
                <h3>{"Recent Popups"}</h3>
                {
                    if component.recent_popups.is_empty() {
                        html! { <p>{"No recent popups"}</p> }
                    } else {
                        html! {
                            <ul>
                                { for component.recent_popups.iter().map(|p| popup_card(link, p, false)) }
                            </ul>
                        }
                    }
                }
            </div>
        </div>
    }
}

fn popup_card(link: &Scope<PopupComposer>, popup: &PopupConfig, active: bool) -> Html {
    let uuid = popup.uuid.clone();
    let toggle = {
        let uuid = uuid.clone();
        link.callback(move |_| Msg::ToggleActive {
            uuid: uuid.clone(),
            activate: !active,
        })
    };
    let delete = link.callback(move |_| Msg::Delete(uuid.clone()));

    html! {
        <li class="popup-card" key={popup.uuid.clone()}>
            {
                if popup.preview_image.is_empty() {
                    html! {}
                } else {
                    html! {
                        <img
                            class="popup-thumb"
                            src={format!("data:image/png;base64,{}", popup.preview_image)}
                            alt={popup.heading.clone()}
                        />
                    }
                }
            }
            <div class="popup-card-actions">
                {
                    if active {
                        html! {
                            <button class="btn-deactivate" onclick={toggle}>{"Deactivate"}</button>
                        }
                    } else {
                        html! {
                            <>
                                <button class="btn-activate" onclick={toggle}>{"Activate"}</button>
                                <button class="btn-delete" onclick={delete}>{"Delete"}</button>
                            </>
                        }
                    }
                }
            </div>
        </li>
    }
}
