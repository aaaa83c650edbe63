use std::thread::JoinHandle;
use std::time::Instant;

use crate::common::DetectorConfig;
use crate::data::{detection_channels, DetectionState, SendState};
use crate::detection_runners::{InferenceExecutor, InferenceProcess};

/// Starts a background detection thread and returns the channels to talk to it.
///
/// The thread owns its own single-threaded tokio runtime for the executor's futures.
/// Every image carries its own reply channel, so the returned [`SendState`] can be
/// cloned or shared across threads. The worker exits once all clones are dropped.
pub fn spawn_detector<E>(executor: E, config: DetectorConfig) -> anyhow::Result<(SendState, JoinHandle<()>)>
where
    E: InferenceExecutor + Send + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let (detection_state, send_state) = detection_channels();
    let process = InferenceProcess::new(executor, config);

    let handle = std::thread::Builder::new()
        .name("koten-detect".to_string())
        .spawn(move || detection_loop(&runtime, &process, detection_state))?;

    Ok((send_state, handle))
}

fn detection_loop<E: InferenceExecutor>(
    runtime: &tokio::runtime::Runtime,
    process: &InferenceProcess<E>,
    detection_state: DetectionState,
) {
    log::info!("Detection worker started");
    // MESSAGE LOOP STARTS HERE
    while let Ok((image, det_tx)) = detection_state.opt_rx.recv() {
        let detect_time = Instant::now();
        let reply = runtime.block_on(process.run(&image));

        match &reply {
            Ok(detections) => log::debug!("Detected {} regions in {:.2?}", detections.len(), detect_time.elapsed()),
            Err(err) => log::error!("Detection failed: {err}"),
        }

        if det_tx.send(reply).is_err() {
            log::warn!("Caller left before its detections were ready");
        }
    }
    log::info!("Detection worker stopped");
}
