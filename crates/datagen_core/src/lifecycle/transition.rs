/// Generator lifecycle transitions.
///
/// `Start` and `Stop` are requested by the controlling thread. `Joined` and
/// `WorkerLost` are taken by the supervisor once it has observed the worker
/// thread terminate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Transition {
    Start,
    Stop,
    Joined,
    WorkerLost,
}

/// Internal, compact IDs used for error payloads.
impl Transition {
    pub const fn id(self) -> u8 {
        match self {
            Transition::Start => 1,
            Transition::Stop => 2,
            Transition::Joined => 3,
            Transition::WorkerLost => 4,
        }
    }
}

/// Canonical list of all lifecycle transitions.
pub const ALL_TRANSITIONS: [Transition; 4] = [
    Transition::Start,
    Transition::Stop,
    Transition::Joined,
    Transition::WorkerLost,
];
