use crate::controller::MountReport;

#[derive(Clone)]
pub enum Msg {
    Mounted(MountReport),
    MountFailed(String),
}
