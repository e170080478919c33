use common::model::popup::PopupConfig;

use super::state::{DragKind, TextBlock};

pub enum Msg {
    // Initial load.
    PopupsLoaded(Vec<PopupConfig>),
    LoadFailed(String),

    // Screen transitions.
    ShowForm,
    CancelForm,

    // Form fields.
    UpdateHeading(String),
    UpdateBody(String),
    UpdateFooter(String),
    SetFrequency(String),
    SetTimeFrequency(String),
    SetOnDay(String),
    FileSelected(web_sys::File),
    ImageLoaded(String),
    RemoveImage,
    ToggleOnlyImage,

    // Preview styling.
    CycleTextAlignment,
    CycleImagePosition,
    SetBgColor(String),
    SetHeadingColor(String),
    SetBodyColor(String),
    SetFooterColor(String),

    // Text block drag/resize.
    DragStart { block: TextBlock, kind: DragKind, x: f64, y: f64 },
    DragMove { x: f64, y: f64 },
    DragEnd,

    // Submission: rasterize, then POST.
    Submit,
    PreviewRendered(String),
    SubmitSucceeded(PopupConfig),
    SubmitFailed(String),

    // Same rendering, saved locally instead of transmitted.
    DownloadPreview,
    DownloadReady(String),

    // List actions.
    ToggleActive { uuid: String, activate: bool },
    Toggled(PopupConfig),
    Delete(String),
    Deleted(String),
    RequestFailed(String),
}
