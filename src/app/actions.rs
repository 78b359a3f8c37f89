#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,

    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    /// Open the highlighted collection or video.
    Activate,
    /// Close the topmost overlay, or leave a collection.
    Back,

    NextPage,
    PrevPage,
    CycleSort,
    Retry,
    OpenFeatured,

    // Collection pattern editing
    StartPatternEdit,
    InputChar(char),
    Backspace,
    ClearInput,
    SubmitPattern,
    CancelInput,

    PlayDetail,
    ToggleHelp,
    Resize,
}
