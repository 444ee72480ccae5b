//! UseCase: 配車セッションの進行管理
//!
//! 1 接続につき 1 つの `RideSessionCoordinator` を持つ。リクエストを受けると
//! ドライバーを生成し、迎車区間・乗車区間の 2 つの移動を順に実行する。
//! 区間の完了通知を受けてから次のフェーズへ進む。
//!
//! キャンセル・切断時は世代番号を進めてタスクを中断する。タイマー由来の
//! 送信はすべてセッションのロック内で世代を確認してから行うため、
//! キャンセル後に古いイベントが届くことはない。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::domain::{
    ConnectionId, Coordinate, DriverFactory, MotionConfig, MotionPlan, RandomSource,
    RideError, RideEvent, RideEventPusher, RideRequest, RideSession, RideStatus,
};

use super::motion::{MotionOutcome, MotionRun, MotionSink};

struct SessionState {
    session: RideSession,
    rng: Box<dyn RandomSource>,
    ride_task: Option<JoinHandle<()>>,
}

impl SessionState {
    fn abort_ride_task(&mut self) {
        if let Some(task) = self.ride_task.take() {
            task.abort();
        }
    }
}

/// State shared between the coordinator and its ride task.
struct SessionShared {
    connection_id: ConnectionId,
    event_pusher: Arc<dyn RideEventPusher>,
    state: Mutex<SessionState>,
}

impl SessionShared {
    /// Push failures are logged; the ride itself keeps going.
    async fn push(&self, event: RideEvent) {
        let name = event.name();
        if let Err(e) = self.event_pusher.push_to(&self.connection_id, event).await {
            tracing::warn!(
                "Failed to push '{}' to '{}': {}",
                name,
                self.connection_id,
                e
            );
        }
    }

    /// Apply `transitions` in order for `generation`, pushing each new status.
    async fn advance(&self, generation: u64, transitions: &[RideStatus]) -> bool {
        let mut state = self.state.lock().await;
        for &next in transitions {
            if !state.session.advance(generation, next) {
                return false;
            }
            tracing::info!("Ride on '{}' is now {}", self.connection_id, next);
            self.push(RideEvent::RideStatus(next)).await;
        }
        true
    }
}

/// Forwards motion positions to the rider while the ride generation is current.
struct DriverPositionSink {
    shared: Arc<SessionShared>,
    generation: u64,
}

#[async_trait]
impl MotionSink for DriverPositionSink {
    async fn emit(&self, position: Coordinate) -> bool {
        let mut state = self.shared.state.lock().await;
        if !state.session.move_driver(self.generation, position) {
            return false;
        }
        self.shared.push(RideEvent::DriverLocation(position)).await;
        true
    }
}

/// 配車セッションのコーディネーター
pub struct RideSessionCoordinator {
    shared: Arc<SessionShared>,
    driver_factory: DriverFactory,
    motion: MotionConfig,
}

impl RideSessionCoordinator {
    pub fn new(
        connection_id: ConnectionId,
        event_pusher: Arc<dyn RideEventPusher>,
        rng: Box<dyn RandomSource>,
        driver_factory: DriverFactory,
        motion: MotionConfig,
    ) -> Self {
        Self {
            shared: Arc::new(SessionShared {
                connection_id,
                event_pusher,
                state: Mutex::new(SessionState {
                    session: RideSession::new(),
                    rng,
                    ride_task: None,
                }),
            }),
            driver_factory,
            motion,
        }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.shared.connection_id
    }

    pub async fn status(&self) -> RideStatus {
        self.shared.state.lock().await.session.status()
    }

    /// 配車リクエストを処理する
    ///
    /// ドライバーを生成して `driverAssigned` と `rideStatus(driver_assigned)`
    /// を送信し、移動タスクを開始する。
    ///
    /// # Errors
    ///
    /// 進行中の配車がある場合は `RideError::RideAlreadyInProgress`。
    /// このとき `rideError` を送信し、状態は変更しない。
    pub async fn request_ride(&self, request: RideRequest) -> Result<(), RideError> {
        let mut guard = self.shared.state.lock().await;
        let state = &mut *guard;

        if let Err(err) = state.session.accept_request(request.clone()) {
            tracing::warn!("Rejected ride request on '{}': {}", self.connection_id(), err);
            self.shared.push(RideEvent::from(&err)).await;
            return Err(err);
        }

        let driver = self
            .driver_factory
            .fabricate(&mut *state.rng, request.pickup);
        let start = driver.position;
        let Some(generation) = state.session.assign_driver(driver.clone()) else {
            tracing::error!(
                "Session '{}' was not waiting for a driver",
                self.connection_id()
            );
            return Ok(());
        };
        tracing::info!(
            "Assigned {} to '{}' at {} (pickup {}, drop {})",
            driver.id.as_str(),
            self.connection_id(),
            start,
            request.pickup,
            request.drop
        );

        self.shared.push(RideEvent::DriverAssigned(driver)).await;
        self.shared
            .push(RideEvent::RideStatus(RideStatus::DriverAssigned))
            .await;

        state.abort_ride_task();
        state.ride_task = Some(tokio::spawn(run_ride(
            self.shared.clone(),
            generation,
            start,
            request,
            self.motion,
        )));
        Ok(())
    }

    /// 配車をキャンセルして `idle` に戻す
    ///
    /// `idle` では `rideStatus(idle)` を返すだけ、`completed` では完了を
    /// 確認済みとしてリセットする。戻り値はキャンセル前の状態。
    pub async fn cancel_ride(&self) -> RideStatus {
        let mut state = self.shared.state.lock().await;
        state.abort_ride_task();
        let previous = state.session.cancel();
        tracing::info!(
            "Ride on '{}' cancelled (was {})",
            self.connection_id(),
            previous
        );
        self.shared
            .push(RideEvent::RideStatus(RideStatus::Idle))
            .await;
        previous
    }

    /// 受け付けられなかったコマンドを `rideError` として通知する
    pub async fn report_error(&self, err: &RideError) {
        tracing::warn!("Rejected command on '{}': {}", self.connection_id(), err);
        self.shared.push(RideEvent::from(err)).await;
    }

    /// 接続終了時の後片付け。何も送信しない。
    pub async fn shutdown(&self) {
        let mut state = self.shared.state.lock().await;
        state.session.revoke();
        state.abort_ride_task();
        tracing::debug!("Ride session '{}' shut down", self.connection_id());
    }
}

/// Source of a fresh random source for each new session.
pub type RandomSourceFactory = Arc<dyn Fn() -> Box<dyn RandomSource> + Send + Sync>;

/// 接続ごとの `RideSessionCoordinator` を生成する
pub struct RideSessionFactory {
    event_pusher: Arc<dyn RideEventPusher>,
    random_source: RandomSourceFactory,
    driver_factory: DriverFactory,
    motion: MotionConfig,
}

impl RideSessionFactory {
    pub fn new(
        event_pusher: Arc<dyn RideEventPusher>,
        random_source: RandomSourceFactory,
        driver_factory: DriverFactory,
        motion: MotionConfig,
    ) -> Self {
        Self {
            event_pusher,
            random_source,
            driver_factory,
            motion,
        }
    }

    pub fn create(&self, connection_id: ConnectionId) -> RideSessionCoordinator {
        RideSessionCoordinator::new(
            connection_id,
            self.event_pusher.clone(),
            (self.random_source)(),
            self.driver_factory.clone(),
            self.motion,
        )
    }
}

/// Both legs of one ride. Dropping this future (abort) drops the current
/// motion handle, which stops the run.
async fn run_ride(
    shared: Arc<SessionShared>,
    generation: u64,
    start: Coordinate,
    request: RideRequest,
    motion: MotionConfig,
) {
    let legs: [(Coordinate, Coordinate, &[RideStatus]); 2] = [
        (
            start,
            request.pickup,
            &[RideStatus::DriverArriving, RideStatus::Ongoing],
        ),
        (request.pickup, request.drop, &[RideStatus::Completed]),
    ];

    for (from, to, transitions) in legs {
        let run = MotionRun::spawn(
            MotionPlan::new(from, to, motion.steps),
            motion.step_delay,
            DriverPositionSink {
                shared: shared.clone(),
                generation,
            },
        );
        if run.finished().await != MotionOutcome::Completed {
            return;
        }
        if !shared.advance(generation, transitions).await {
            return;
        }
    }
}
