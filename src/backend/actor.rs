use super::messages::{BackendCommand, BackendEvent};
use crate::downloader::{DownloadService, ProgressEvent};
use crate::selection::QualityRequest;
use crate::utils::Result;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Runs the download service off the GUI thread.
///
/// Commands are handled one at a time, so at most one download is in flight.
pub struct BackendActor {
    receiver: mpsc::Receiver<BackendCommand>,
    sender: mpsc::Sender<BackendEvent>,
    service: Option<DownloadService>,
}

impl BackendActor {
    /// Without a service the actor looks for yt-dlp on every command, so
    /// installing it while the window is open is enough.
    pub fn new(
        service: Option<DownloadService>,
        receiver: mpsc::Receiver<BackendCommand>,
        sender: mpsc::Sender<BackendEvent>,
    ) -> Self {
        Self {
            receiver,
            sender,
            service,
        }
    }

    pub async fn run(mut self) {
        info!("BackendActor started");

        while let Some(cmd) = self.receiver.recv().await {
            debug!("Backend command: {:?}", cmd);
            match cmd {
                BackendCommand::FetchInfo { url } => {
                    let result = match self.service(None) {
                        Ok(service) => service.video_info(&url).await.map_err(|e| e.to_string()),
                        Err(e) => Err(e.to_string()),
                    };
                    self.send(BackendEvent::InfoLoaded(result)).await;
                }
                BackendCommand::LoadFormats { url } => {
                    let result = match self.service(None) {
                        Ok(service) => service
                            .available_formats(&url)
                            .await
                            .map_err(|e| e.to_string()),
                        Err(e) => Err(e.to_string()),
                    };
                    self.send(BackendEvent::FormatsLoaded(result)).await;
                }
                BackendCommand::StartDownload {
                    url,
                    request,
                    output_dir,
                } => {
                    self.handle_start_download(url, request, output_dir).await;
                }
                BackendCommand::Shutdown => {
                    info!("BackendActor shutting down");
                    break;
                }
            }
        }
    }

    async fn handle_start_download(
        &mut self,
        url: String,
        request: QualityRequest,
        output_dir: PathBuf,
    ) {
        let service = match self.service(Some(output_dir)) {
            Ok(service) => service,
            Err(e) => {
                self.send(BackendEvent::DownloadFinished(Err(e.to_string())))
                    .await;
                return;
            }
        };

        let progress_tx = self.sender.clone();
        let mut sink = move |event: ProgressEvent| {
            if let Err(e) = progress_tx.try_send(BackendEvent::Progress(event)) {
                debug!("Dropped progress event: {}", e);
            }
        };

        let result = service
            .download(&url, &request, &mut sink)
            .await
            .map_err(|e| e.to_string());
        self.send(BackendEvent::DownloadFinished(result)).await;
    }

    /// Current service, pointed at `output_dir` when one is given
    fn service(&mut self, output_dir: Option<PathBuf>) -> Result<DownloadService> {
        let service = match self.service.take() {
            Some(service) => service,
            None => DownloadService::with_ytdlp(output_dir.clone().unwrap_or_default())?,
        };

        let service = self.service.insert(service);
        if let Some(dir) = output_dir {
            service.set_output_dir(dir);
        }
        Ok(service.clone())
    }

    async fn send(&self, event: BackendEvent) {
        if let Err(e) = self.sender.send(event).await {
            warn!("GUI dropped backend event: {}", e);
        }
    }
}
