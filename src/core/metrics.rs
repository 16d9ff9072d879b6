use super::types::{SimTime, TaskId};
use serde::Serialize;

/// Timings of one completed task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRecord {
    pub task_id: TaskId,
    pub arrival_time: SimTime,
    pub service_start_time: SimTime,
    pub service_duration: SimTime,
    pub completion_time: SimTime,
}

impl TaskRecord {
    pub fn wait_time(&self) -> SimTime {
        self.service_start_time - self.arrival_time
    }

    pub fn turnaround_time(&self) -> SimTime {
        self.completion_time - self.arrival_time
    }
}

/// One periodic observation of the pool's wait-list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueueSample {
    pub time: SimTime,
    pub queue_length: usize,
}

/// Append-only record of a single run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    /// Waits of completed tasks only. A task still in service at the horizon
    /// was admitted but contributes no wait here.
    pub wait_times: Vec<SimTime>,
    pub turnaround_times: Vec<SimTime>,
    pub queue_samples: Vec<QueueSample>,
    pub task_records: Vec<TaskRecord>,
    pub total_service_time: SimTime,
    pub tasks_completed: u64,
    /// Tasks that were granted a slot, including those still in service at the horizon
    pub tasks_admitted: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_admission(&mut self) {
        self.tasks_admitted += 1;
    }

    /// Commit the timings of a finished task. Wait and turnaround are pushed
    /// together so both series always line up with `tasks_completed`.
    pub fn record_completion(&mut self, record: TaskRecord) {
        self.wait_times.push(record.wait_time());
        self.turnaround_times.push(record.turnaround_time());
        self.total_service_time += record.service_duration;
        self.tasks_completed += 1;
        self.task_records.push(record);
    }

    pub fn record_queue_sample(&mut self, time: SimTime, queue_length: usize) {
        self.queue_samples.push(QueueSample { time, queue_length });
    }

    /// Derive the summary for a run of `capacity` slots over `horizon` time units
    pub fn summarize(&self, capacity: usize, horizon: SimTime) -> SummaryStatistics {
        if self.tasks_completed == 0 {
            return SummaryStatistics::default();
        }

        let queue_lengths: Vec<f64> = self
            .queue_samples
            .iter()
            .map(|sample| sample.queue_length as f64)
            .collect();
        let available = capacity as f64 * horizon;

        SummaryStatistics {
            avg_wait: round_to(mean(&self.wait_times), 2),
            avg_turnaround: round_to(mean(&self.turnaround_times), 2),
            avg_queue: round_to(mean(&queue_lengths), 2),
            utilization: round_to(100.0 * self.total_service_time / available, 1),
            tasks_completed: self.tasks_completed,
        }
    }
}

/// Read-only digest of a completed run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub avg_wait: f64,
    pub avg_turnaround: f64,
    pub avg_queue: f64,
    /// Percentage of available slot-time spent in service
    pub utilization: f64,
    pub tasks_completed: u64,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(task_id: TaskId, arrival: f64, start: f64, duration: f64) -> TaskRecord {
        TaskRecord {
            task_id,
            arrival_time: arrival,
            service_start_time: start,
            service_duration: duration,
            completion_time: start + duration,
        }
    }

    #[test]
    fn test_empty_metrics_summarize_to_zero() {
        let mut metrics = Metrics::new();
        metrics.record_queue_sample(0.0, 3);
        let summary = metrics.summarize(4, 10.0);
        assert_eq!(summary, SummaryStatistics::default());
    }

    #[test]
    fn test_summary_rounding() {
        let mut metrics = Metrics::new();
        metrics.record_completion(record(1, 0.0, 0.0, 1.0));
        metrics.record_completion(record(2, 0.5, 1.0, 1.0));
        metrics.record_completion(record(3, 0.6, 2.0, 1.0));
        for (t, q) in [(0.0, 0), (1.0, 1), (2.0, 0)] {
            metrics.record_queue_sample(t, q);
        }

        let summary = metrics.summarize(2, 9.0);
        // waits: 0, 0.5, 1.4 -> 0.6333
        assert_eq!(summary.avg_wait, 0.63);
        // turnarounds: 1, 1.5, 2.4 -> 1.6333
        assert_eq!(summary.avg_turnaround, 1.63);
        assert_eq!(summary.avg_queue, 0.33);
        // 3 / 18 -> 16.666%
        assert_eq!(summary.utilization, 16.7);
        assert_eq!(summary.tasks_completed, 3);
    }

    #[test]
    fn test_completion_keeps_series_aligned() {
        let mut metrics = Metrics::new();
        metrics.record_admission();
        metrics.record_admission();
        metrics.record_completion(record(1, 1.0, 2.0, 0.5));

        assert_eq!(metrics.tasks_admitted, 2);
        assert_eq!(metrics.tasks_completed, 1);
        assert_eq!(metrics.wait_times, vec![1.0]);
        assert_eq!(metrics.turnaround_times, vec![1.5]);
        assert_eq!(metrics.total_service_time, 0.5);
    }
}
