use crate::common::{Detection, SourceImage};

pub type DetectionReply = anyhow::Result<Vec<Detection>>;

/// One image plus the channel its detections go back on.
pub type DetectionRequest = (SourceImage, crossbeam_channel::Sender<DetectionReply>);

/// Worker side of a detection thread.
#[derive(Debug)]
pub struct DetectionState {
    pub opt_rx: crossbeam_channel::Receiver<DetectionRequest>,
}

/// Caller side of a detection thread. Dropping every clone stops the worker.
#[derive(Debug, Clone)]
pub struct SendState {
    pub opt_tx: crossbeam_channel::Sender<DetectionRequest>,
}

impl SendState {
    /// Sends one image and waits for its detections. Safe to call from several
    /// threads at once, each call gets the reply for its own image.
    pub fn detect(&self, image: SourceImage) -> DetectionReply {
        let (det_tx, det_rx) = crossbeam_channel::bounded(1);
        self.opt_tx
            .send((image, det_tx))
            .map_err(|_| anyhow::anyhow!("Detection worker has stopped"))?;
        det_rx
            .recv()
            .map_err(|_| anyhow::anyhow!("Detection worker has stopped"))?
    }
}

pub fn detection_channels() -> (DetectionState, SendState) {
    let (opt_tx, opt_rx) = crossbeam_channel::unbounded();
    (DetectionState { opt_rx }, SendState { opt_tx })
}
