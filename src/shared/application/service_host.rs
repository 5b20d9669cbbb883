// Host running application services behind a command queue.
//
// Responsibilities
// - Keep one service per aggregate tag, loaded before the host starts.
// - On start, spawn a single worker that drains the queue and dispatches each command to the
//   service for its tag. Failures are logged; the worker keeps going.
// - On stop, let the worker finish the commands already queued, then hand the queue back so
//   the host can be started again.

use crate::shared::application::application_service::ApplicationService;
use crate::shared::application::command::Command;
use crate::shared::application::command_queue::{CommandQueue, CommandQueueReader};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("a service for aggregate '{0}' is already loaded")]
    AlreadyLoaded(&'static str),

    #[error("no service loaded for aggregate '{0}'")]
    ServiceNotFound(String),

    #[error("services cannot be loaded while the host is running")]
    AlreadyRunning,

    #[error("command queue reader was lost by a failed worker")]
    WorkerLost,
}

type Services<C> = HashMap<&'static str, Arc<dyn ApplicationService<C>>>;

struct Worker<C> {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<CommandQueueReader<C>>,
}

pub struct ApplicationServiceHost<C: Command> {
    services: Services<C>,
    queue: CommandQueue<C>,
    reader: Option<CommandQueueReader<C>>,
    worker: Option<Worker<C>>,
}

impl<C: Command> ApplicationServiceHost<C> {
    pub fn new() -> Self {
        let (queue, reader) = CommandQueue::new();
        Self {
            services: HashMap::new(),
            queue,
            reader: Some(reader),
            worker: None,
        }
    }

    /// Writing end of the host's queue.
    pub fn queue(&self) -> CommandQueue<C> {
        self.queue.clone()
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    pub fn load_service(&mut self, service: Arc<dyn ApplicationService<C>>) -> Result<(), HostError> {
        if self.is_running() {
            return Err(HostError::AlreadyRunning);
        }
        let tag = service.aggregate_tag();
        if self.services.contains_key(tag) {
            return Err(HostError::AlreadyLoaded(tag));
        }
        self.services.insert(tag, service);
        info!(aggregate = tag, "application service loaded");
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), HostError> {
        if self.is_running() {
            return Ok(());
        }
        let reader = self.reader.take().ok_or(HostError::WorkerLost)?;
        let services = Arc::new(self.services.clone());
        let (shutdown, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_worker(services, reader, shutdown_rx));
        self.worker = Some(Worker { shutdown, handle });
        info!(services = self.services.len(), "application service host started");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), HostError> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        let _ = worker.shutdown.send(true);
        let reader = worker.handle.await.map_err(|error| {
            warn!(%error, "application service worker failed");
            HostError::WorkerLost
        })?;
        self.reader = Some(reader);
        info!("application service host stopped");
        Ok(())
    }
}

impl<C: Command> Default for ApplicationServiceHost<C> {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_worker<C: Command>(
    services: Arc<Services<C>>,
    mut reader: CommandQueueReader<C>,
    mut shutdown: watch::Receiver<bool>,
) -> CommandQueueReader<C> {
    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                while let Some(command) = reader.try_next() {
                    dispatch(&services, command).await;
                }
                break;
            }
            command = reader.next() => match command {
                Some(command) => dispatch(&services, command).await,
                None => break,
            },
        }
    }
    reader
}

async fn dispatch<C: Command>(services: &Services<C>, command: C) {
    let tag = command.aggregate_tag();
    let Some(service) = services.get(tag) else {
        warn!(error = %HostError::ServiceNotFound(tag.to_string()), ?command, "command dropped");
        return;
    };
    debug!(aggregate = tag, ?command, "dispatching command");
    match service.execute(command).await {
        Ok(version) => debug!(aggregate = tag, version, "command executed"),
        Err(error) => warn!(aggregate = tag, %error, "command failed"),
    }
}

#[cfg(test)]
mod application_service_host_tests {
    use super::*;
    use crate::shared::application::application_service::ApplicationError;
    use rstest::rstest;
    use tokio::sync::Mutex;

    #[derive(Debug)]
    struct Ping {
        tag: &'static str,
        seq: u64,
    }

    impl Command for Ping {
        fn aggregate_tag(&self) -> &'static str {
            self.tag
        }

        fn expected_version(&self) -> Option<u64> {
            None
        }
    }

    struct RecordingService {
        tag: &'static str,
        executed: Mutex<Vec<u64>>,
    }

    impl RecordingService {
        fn new(tag: &'static str) -> Arc<Self> {
            Arc::new(Self {
                tag,
                executed: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait::async_trait]
    impl ApplicationService<Ping> for RecordingService {
        fn aggregate_tag(&self) -> &'static str {
            self.tag
        }

        async fn execute(&self, command: Ping) -> Result<u64, ApplicationError> {
            let mut executed = self.executed.lock().await;
            executed.push(command.seq);
            Ok(executed.len() as u64)
        }
    }

    #[rstest]
    fn it_should_reject_a_second_service_for_the_same_tag() {
        let mut host = ApplicationServiceHost::<Ping>::new();
        host.load_service(RecordingService::new("Example")).unwrap();
        assert_eq!(
            host.load_service(RecordingService::new("Example")),
            Err(HostError::AlreadyLoaded("Example"))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_dispatch_queued_commands_by_tag() {
        let examples = RecordingService::new("Example");
        let others = RecordingService::new("Other");
        let mut host = ApplicationServiceHost::<Ping>::new();
        host.load_service(examples.clone()).unwrap();
        host.load_service(others.clone()).unwrap();
        let queue = host.queue();

        host.start().unwrap();
        queue.enqueue(Ping { tag: "Example", seq: 1 }).unwrap();
        queue.enqueue(Ping { tag: "Missing", seq: 2 }).unwrap();
        queue.enqueue(Ping { tag: "Other", seq: 3 }).unwrap();
        queue.enqueue(Ping { tag: "Example", seq: 4 }).unwrap();
        host.stop().await.unwrap();

        assert_eq!(*examples.executed.lock().await, vec![1, 4]);
        assert_eq!(*others.executed.lock().await, vec![3]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_refuse_new_services_while_running_and_restart_after_stop() {
        let examples = RecordingService::new("Example");
        let mut host = ApplicationServiceHost::<Ping>::new();
        host.load_service(examples.clone()).unwrap();

        host.start().unwrap();
        host.start().unwrap();
        assert!(host.is_running());
        assert_eq!(
            host.load_service(RecordingService::new("Other")),
            Err(HostError::AlreadyRunning)
        );
        host.stop().await.unwrap();
        assert!(!host.is_running());

        host.queue().enqueue(Ping { tag: "Example", seq: 9 }).unwrap();
        host.start().unwrap();
        host.stop().await.unwrap();
        assert_eq!(*examples.executed.lock().await, vec![9]);
    }
}
