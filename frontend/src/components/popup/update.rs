//! Update function for the popup composer, Elm-style: take the state, the
//! context and a message, mutate, and return whether to re-render.
//!
//! Key behaviors
//! - Initial load partitions the stored popups and picks the first screen:
//!   the form when the store is empty, the list otherwise.
//! - Submission rasterizes the preview to a PNG data URL, then POSTs the
//!   configuration; a capacity rejection surfaces as a toast and the form is
//!   abandoned for the list, matching the create contract.
//! - Activate/deactivate and delete act on `uuid` and move records between
//!   the active and recent lists from the server's response.
//! - Drag and resize apply pointer deltas against the rect captured at drag
//!   start, clamped to the text region.

use common::model::popup::{Frequency, Weekday};
use common::requests::{
    CreatePopupRequest, DeletePopupRequest, MessageResponse, PopupResponse, TogglePopupRequest,
};
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::{self, show_toast};
use super::messages::Msg;
use super::state::{BlockRect, DragKind, DragState, PopupComposer, Screen};

pub fn update(component: &mut PopupComposer, ctx: &Context<PopupComposer>, msg: Msg) -> bool {
    match msg {
        Msg::PopupsLoaded(popups) => {
            let (active, recent): (Vec<_>, Vec<_>) =
                popups.into_iter().partition(|p| p.is_active);
            component.screen = if active.is_empty() && recent.is_empty() {
                Screen::Form
            } else {
                Screen::List
            };
            component.active_popups = active;
            component.recent_popups = recent;
            true
        }
        Msg::LoadFailed(message) => {
            show_toast(&message);
            component.screen = Screen::Form;
            true
        }

        Msg::ShowForm => {
            component.screen = Screen::Form;
            true
        }
        Msg::CancelForm => {
            component.reset_form();
            component.screen = Screen::List;
            true
        }

        Msg::UpdateHeading(value) => {
            component.heading = value;
            true
        }
        Msg::UpdateBody(value) => {
            component.body_text = value;
            true
        }
        Msg::UpdateFooter(value) => {
            component.footer_text = value;
            true
        }
        Msg::SetFrequency(raw) => {
            if let Some(frequency) = Frequency::parse(&raw) {
                component.frequency = frequency;
            }
            true
        }
        Msg::SetTimeFrequency(raw) => {
            component.time_frequency = raw.parse().ok();
            true
        }
        Msg::SetOnDay(raw) => {
            if let Some(day) = Weekday::parse(&raw) {
                component.on_day = day;
            }
            true
        }
        Msg::FileSelected(file) => {
            let link = ctx.link().clone();
            wasm_bindgen_futures::spawn_local(async move {
                let blob = gloo_file::Blob::from(file);
                match gloo_file::futures::read_as_data_url(&blob).await {
                    Ok(url) => link.send_message(Msg::ImageLoaded(url)),
                    Err(err) => link.send_message(Msg::RequestFailed(err.to_string())),
                }
            });
            false
        }
        Msg::ImageLoaded(data_url) => {
            component.image = Some(data_url);
            true
        }
        Msg::RemoveImage => {
            component.image = None;
            component.only_image = false;
            true
        }
        Msg::ToggleOnlyImage => {
            component.only_image = !component.only_image;
            true
        }

        Msg::CycleTextAlignment => {
            component.text_alignment = component.text_alignment.next();
            true
        }
        Msg::CycleImagePosition => {
            component.image_position = component.image_position.next();
            true
        }
        Msg::SetBgColor(value) => {
            component.bg_color = value;
            true
        }
        Msg::SetHeadingColor(value) => {
            component.heading_color = value;
            true
        }
        Msg::SetBodyColor(value) => {
            component.body_color = value;
            true
        }
        Msg::SetFooterColor(value) => {
            component.footer_color = value;
            true
        }

        Msg::DragStart { block, kind, x, y } => {
            component.drag = Some(DragState {
                block,
                kind,
                pointer_x: x,
                pointer_y: y,
                origin: component.rect(block),
            });
            true
        }
        Msg::DragMove { x, y } => {
            let Some(drag) = component.drag else {
                return false;
            };
            let dx = x - drag.pointer_x;
            let dy = y - drag.pointer_y;
            let (bounds_w, bounds_h) = component.layout().text_region_size();
            let moved = match drag.kind {
                DragKind::Move => BlockRect {
                    x: drag.origin.x + dx,
                    y: drag.origin.y + dy,
                    ..drag.origin
                },
                DragKind::Resize => BlockRect {
                    width: (drag.origin.width + dx).max(40.0),
                    height: (drag.origin.height + dy).max(20.0),
                    ..drag.origin
                },
            };
            *component.rect_mut(drag.block) = moved.clamped(bounds_w, bounds_h);
            true
        }
        Msg::DragEnd => {
            let was_dragging = component.drag.is_some();
            component.drag = None;
            was_dragging
        }

        Msg::Submit => {
            if component.submitting {
                return false;
            }
            component.submitting = true;
            let link = ctx.link().clone();
            helpers::rasterize(
                helpers::preview_spec(component),
                Callback::from(move |result: Result<String, String>| match result {
                    Ok(url) => link.send_message(Msg::PreviewRendered(url)),
                    Err(message) => link.send_message(Msg::SubmitFailed(message)),
                }),
            );
            true
        }
        Msg::PreviewRendered(data_url) => {
            let request = CreatePopupRequest {
                heading: component.heading.clone(),
                body_text: component.body_text.clone(),
                footer_text: component.footer_text.clone(),
                frequency: component.frequency,
                time_frequency: if component.frequency == Frequency::Repeatedly {
                    component.time_frequency
                } else {
                    None
                },
                popup: Some(true),
                on_day: (component.frequency == Frequency::OnDay).then_some(component.on_day),
                preview_image: data_url,
            };
            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::post("/api/popups").json(&request).unwrap().send().await {
                    Ok(resp) if resp.status() == 200 => match resp.json::<PopupResponse>().await {
                        Ok(body) => {
                            show_toast(&body.message);
                            link.send_message(Msg::SubmitSucceeded(body.data));
                        }
                        Err(err) => link.send_message(Msg::SubmitFailed(err.to_string())),
                    },
                    Ok(resp) => {
                        // Capacity rejections carry the reason in `message`.
                        let status = resp.status();
                        let message = resp
                            .json::<MessageResponse>()
                            .await
                            .map(|body| body.message)
                            .unwrap_or_else(|_| format!("Request failed with status {}", status));
                        link.send_message(Msg::SubmitFailed(message));
                    }
                    Err(err) => link.send_message(Msg::SubmitFailed(err.to_string())),
                }
            });
            false
        }
        Msg::SubmitSucceeded(popup) => {
            component.submitting = false;
            component.active_popups.push(popup);
            component.reset_form();
            component.screen = Screen::List;
            true
        }
        Msg::SubmitFailed(message) => {
            show_toast(&message);
            // The form is abandoned either way; the list shows what stands.
            component.abandon_submission();
            true
        }

        Msg::DownloadPreview => {
            let link = ctx.link().clone();
            helpers::rasterize(
                helpers::preview_spec(component),
                Callback::from(move |result: Result<String, String>| match result {
                    Ok(url) => link.send_message(Msg::DownloadReady(url)),
                    Err(message) => link.send_message(Msg::RequestFailed(message)),
                }),
            );
            false
        }
        Msg::DownloadReady(data_url) => {
            helpers::trigger_download(&data_url);
            false
        }

        Msg::ToggleActive { uuid, activate } => {
            let request = TogglePopupRequest { uuid, popup: activate };
            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::put("/api/popups").json(&request).unwrap().send().await {
                    Ok(resp) if resp.status() == 200 => match resp.json::<PopupResponse>().await {
                        Ok(body) => {
                            show_toast(&body.message);
                            link.send_message(Msg::Toggled(body.data));
                        }
                        Err(err) => link.send_message(Msg::RequestFailed(err.to_string())),
                    },
                    Ok(resp) => link.send_message(Msg::RequestFailed(format!(
                        "Failed to update popup (status {})",
                        resp.status()
                    ))),
                    Err(err) => link.send_message(Msg::RequestFailed(err.to_string())),
                }
            });
            false
        }
        Msg::Toggled(popup) => {
            component.active_popups.retain(|p| p.uuid != popup.uuid);
            component.recent_popups.retain(|p| p.uuid != popup.uuid);
            if popup.is_active {
                component.active_popups.push(popup);
            } else {
                component.recent_popups.push(popup);
            }
            true
        }
        Msg::Delete(uuid) => {
            let request = DeletePopupRequest { uuid: uuid.clone() };
            let link = ctx.link().clone();
            spawn_local(async move {
                match Request::delete("/api/popups").json(&request).unwrap().send().await {
                    Ok(resp) if resp.status() == 200 => {
                        let message = resp
                            .json::<MessageResponse>()
                            .await
                            .map(|body| body.message)
                            .unwrap_or_else(|_| "Popup deleted successfully".to_string());
                        show_toast(&message);
                        link.send_message(Msg::Deleted(request.uuid));
                    }
                    Ok(resp) => link.send_message(Msg::RequestFailed(format!(
                        "Failed to delete popup (status {})",
                        resp.status()
                    ))),
                    Err(err) => link.send_message(Msg::RequestFailed(err.to_string())),
                }
            });
            false
        }
        Msg::Deleted(uuid) => {
            component.active_popups.retain(|p| p.uuid != uuid);
            component.recent_popups.retain(|p| p.uuid != uuid);
            true
        }
        Msg::RequestFailed(message) => {
            show_toast(&message);
            false
        }
    }
}
