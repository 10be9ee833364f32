use crate::modules::profile::application::ports::outgoing::ProfileSubscription;

pub trait WatchProfileUseCase: Send + Sync {
    fn execute(&self) -> ProfileSubscription;
}
