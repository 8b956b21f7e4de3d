use std::{sync::Arc, time::Duration};

use tracing::{Instrument, info, warn};

use tasklabels_core::{LabelContext, LabelsConfig, install, label_values};
use tasklabels_observe::{LogObserver, LoggerConfig, LoggerLevel, init_logger, labels_span};
use tasklabels_prometheus::{Encoder, PrometheusMetrics, TextEncoder};

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // 1) logger
    let cfg = LoggerConfig {
        level: LoggerLevel::new("info,tasklabels_core=debug")?,
        ..Default::default()
    };
    init_logger(&cfg)?;
    info!("logger initialized");

    // 2) observer + metrics
    let observer = Arc::new(LogObserver::new());
    let metrics = PrometheusMetrics::new()?;

    // 3) process-wide context from TASKLABELS_* variables
    let labels_cfg = LabelsConfig::from_env()?;
    let ctx = LabelContext::from_config(&labels_cfg)?
        .with_observer(observer.clone())
        .with_metrics(Arc::new(metrics.clone()));
    info!(
        propagation = %labels_cfg.propagation,
        propagating = ctx.is_propagating(),
        "label context ready"
    );
    install(ctx)?;

    // 4) concurrent requests, each with its own labels
    let mut requests = Vec::new();
    for (id, tenant) in [(1, "acme"), (2, "globex"), (3, "acme")] {
        let observer = observer.clone();
        let request = tasklabels_core::with_labels(
            &label_values!["request", id, "tenant", tenant],
            handle_request(observer),
        )?;
        requests.push(tokio::spawn(request));
    }
    for request in requests {
        request.await?;
    }

    // 5) a label scope the gate may refuse
    match tasklabels_core::with_labels_sync(&label_values!["job", "compact"], || {
        observer.log_current("compaction pass")
    }) {
        Ok(()) => {}
        Err(e) => warn!(error = %e, "labels unavailable"),
    }

    // 6) metrics
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metrics.gather(), &mut buffer)?;
    println!("{}", String::from_utf8(buffer)?);

    Ok(())
}

async fn handle_request(observer: Arc<LogObserver>) {
    let ctx = match tasklabels_core::global() {
        Ok(ctx) => ctx,
        Err(e) => {
            warn!(error = %e, "no label context");
            return;
        }
    };

    observer.log_current("request received");
    tokio::time::sleep(Duration::from_millis(10)).await;

    // nested scope: adds a phase, drops the tenant
    let nested = ctx.with_labels(&label_values!["phase", "db", "tenant", None::<&str>], {
        let observer = observer.clone();
        async move {
            tokio::time::sleep(Duration::from_millis(5)).await;
            observer.log_current("querying");
        }
    });
    match nested {
        Ok(fut) => fut.instrument(labels_span(ctx, "db")).await,
        Err(e) => warn!(error = %e, "nested labels rejected"),
    }

    // background work keeps the request labels
    let background = ctx.spawn({
        let observer = observer.clone();
        async move { observer.log_current("audit record written") }
    });
    if let Err(e) = background.await {
        warn!(error = %e, "audit task failed");
    }

    observer.log_current("request done");
}
