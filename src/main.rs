//! Temporal Cache demo host
//!
//! Runs a small person repository behind the caching interceptor and logs
//! what the cache does.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load and validate configuration from environment variables
//! 3. Create the cache container with the configured rules
//! 4. Start the expiration sweeper and the notification logger
//! 5. Run the repository workload through the interceptor
//! 6. Log statistics and shut the background tasks down

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Context;
use parking_lot::RwLock;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use temporal_cache::cache::Notifier;
use temporal_cache::{
    spawn_expiration_sweeper, spawn_notification_logger, CacheContainer, CachingInterceptor,
    Config,
};

#[derive(Debug, Clone)]
struct Person {
    id: u32,
    name: String,
}

/// Results the repository hands back and the cache stores.
#[derive(Debug, Clone)]
enum Record {
    Person(Person),
    People(Vec<Person>),
    Deleted(String),
}

/// In-memory repository standing in for a slow data source.
#[derive(Default)]
struct PersonRepository {
    people: RwLock<BTreeMap<u32, Person>>,
}

impl PersonRepository {
    fn seeded() -> Self {
        let repo = Self::default();
        for (id, name) in [(1, "Ada"), (2, "Grace"), (3, "Barbara")] {
            repo.people.write().insert(
                id,
                Person {
                    id,
                    name: name.to_string(),
                },
            );
        }
        repo
    }

    fn retrieve_persons(&self) -> Option<Record> {
        Some(Record::People(self.people.read().values().cloned().collect()))
    }

    fn retrieve_person(&self, id: u32) -> Option<Record> {
        self.people.read().get(&id).cloned().map(Record::Person)
    }

    fn delete_person(&self, id: u32) -> Option<Record> {
        self.people
            .write()
            .remove(&id)
            .map(|p| Record::Deleted(format!("{} ({})", p.name, p.id)))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "temporal_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Temporal Cache demo");

    let mut config = Config::from_env();
    if config.cacheable_prefixes.is_empty() && config.invalidating_prefixes.is_empty() {
        config.cacheable_prefixes = vec!["Retrieve".to_string()];
        config.invalidating_prefixes = vec!["Delete".to_string(), "Update".to_string()];
    }
    config.validate().context("invalid cache configuration")?;
    info!(
        "Configuration loaded: cacheable={:?}, invalidating={:?}, sliding={}s, sweep={}ms",
        config.cacheable_prefixes,
        config.invalidating_prefixes,
        config.sliding_expiration_secs,
        config.sweep_interval_ms
    );

    let cache: Arc<CacheContainer<Record>> = Arc::new(CacheContainer::with_notifier(
        config.rules()?,
        Notifier::new(config.notification_capacity),
    ));
    let logger = spawn_notification_logger(cache.subscribe());
    let sweeper = spawn_expiration_sweeper(cache.clone(), config.sweep_interval());
    info!("Background tasks started");

    let repo = PersonRepository::seeded();
    let interceptor = CachingInterceptor::new(cache.clone(), config.sliding_expiration());

    for round in 1..=2 {
        let all = interceptor.call("RetrievePersons", &(), || repo.retrieve_persons())?;
        let ada = interceptor.call("RetrievePerson", &1, || repo.retrieve_person(1))?;
        info!(round, ?all, ?ada, "Retrieved persons");
    }

    let missing = interceptor.call("RetrievePerson", &42, || repo.retrieve_person(42))?;
    info!(?missing, "Retrieved unknown person");

    let deleted = interceptor.call("DeletePerson", &2, || repo.delete_person(2))?;
    info!(?deleted, entries = cache.len(), "Deleted person");

    let all = interceptor.call("RetrievePersons", &(), || repo.retrieve_persons())?;
    info!(?all, "Retrieved persons after delete");

    let stats = cache.stats();
    info!(
        "Cache stats: {}",
        serde_json::to_string(&stats).context("serializing stats")?
    );
    info!("Hit rate: {:.2}", stats.hit_rate());

    sweeper.abort();
    // Awaiting drops the task's clone of the cache
    let _ = sweeper.await;
    drop(interceptor);
    drop(cache);
    let logged = logger.await.context("notification logger panicked")?;
    info!(logged, "Demo complete");

    Ok(())
}
