use prometheus::{
    Encoder, Histogram, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub orders_created_total: IntCounterVec,
    pub order_transitions_total: IntCounterVec,
    pub queue_lookups_total: IntCounter,
    pub estimated_wait_minutes: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let orders_created_total = IntCounterVec::new(
            Opts::new("orders_created_total", "Order creations by outcome"),
            &["outcome"],
        )
        .expect("valid orders_created_total metric");

        let order_transitions_total = IntCounterVec::new(
            Opts::new("order_transitions_total", "Order status transitions by target"),
            &["status"],
        )
        .expect("valid order_transitions_total metric");

        let queue_lookups_total =
            IntCounter::new("queue_lookups_total", "Total queue position lookups")
                .expect("valid queue_lookups_total metric");

        let estimated_wait_minutes = Histogram::with_opts(
            prometheus::HistogramOpts::new(
                "estimated_wait_minutes",
                "Wait estimates returned to customers in minutes",
            )
            .buckets(vec![0.0, 10.0, 20.0, 30.0, 60.0, 120.0]),
        )
        .expect("valid estimated_wait_minutes metric");

        registry
            .register(Box::new(orders_created_total.clone()))
            .expect("register orders_created_total");
        registry
            .register(Box::new(order_transitions_total.clone()))
            .expect("register order_transitions_total");
        registry
            .register(Box::new(queue_lookups_total.clone()))
            .expect("register queue_lookups_total");
        registry
            .register(Box::new(estimated_wait_minutes.clone()))
            .expect("register estimated_wait_minutes");

        Self {
            registry,
            orders_created_total,
            order_transitions_total,
            queue_lookups_total,
            estimated_wait_minutes,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}
