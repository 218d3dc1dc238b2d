// Recommendation Scorer
//
// Derives ranked barber and service recommendations from a customer's
// completed-appointment history. Frequency, recency, and spend are
// normalized against the customer's own maxima and blended into a 0-100
// score with a short human-readable reason. With no history, the scorer
// falls back to a caller-supplied popularity list.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Appointment, AppointmentService, Barber, Service};

/// Fixed score assigned to popularity-fallback recommendations
const POPULAR_SCORE: i32 = 70;

/// A service line item within a completed visit (booking-time snapshot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitService {
    pub service_id: i32,
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: i32,
}

impl VisitService {
    /// Build a visit line from a stored line item and its menu row
    ///
    /// The price comes from the booking-time snapshot; only the display
    /// name and duration are read from the menu row, since menu prices
    /// may have changed since the visit.
    pub fn from_line(line: &AppointmentService, service: &Service) -> Self {
        Self {
            service_id: line.service_id,
            name: service.name.clone(),
            price: line.price,
            duration_minutes: service.duration_minutes,
        }
    }
}

/// One completed appointment from the customer's history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletedVisit {
    pub barber_id: i32,
    pub barber_name: String,
    pub date: NaiveDate,
    pub final_price: Decimal,
    pub services: Vec<VisitService>,
}

impl CompletedVisit {
    /// Assemble a history entry from fetched rows
    pub fn from_appointment(
        appointment: &Appointment,
        barber: &Barber,
        services: Vec<VisitService>,
    ) -> Self {
        Self {
            barber_id: barber.id,
            barber_name: barber.name.clone(),
            date: appointment.appointment_date,
            final_price: appointment.final_price,
            services,
        }
    }
}

/// A scored barber recommendation
#[derive(Debug, Clone, Serialize)]
pub struct BarberRecommendation {
    pub barber_id: i32,
    pub name: String,
    /// 0-100
    pub score: i32,
    pub reason: String,
    pub usage_count: u32,
    pub last_used: Option<NaiveDate>,
}

/// A scored service recommendation, carrying the latest snapshot the
/// customer saw of the service's price and duration
#[derive(Debug, Clone, Serialize)]
pub struct ServiceRecommendation {
    pub service_id: i32,
    pub name: String,
    pub price: Decimal,
    pub duration_minutes: i32,
    /// 0-100
    pub score: i32,
    pub reason: String,
    pub usage_count: u32,
    pub last_used: Option<NaiveDate>,
}

/// Top-3 barber and service recommendations for one customer
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationSet {
    pub barbers: Vec<BarberRecommendation>,
    pub services: Vec<ServiceRecommendation>,
}

/// Per-barber accumulator, kept in first-seen order
struct BarberStats {
    barber_id: i32,
    name: String,
    frequency: u32,
    recency_weight: f64,
    total_spent: f64,
    last_used: NaiveDate,
}

/// Per-service accumulator, kept in first-seen order
struct ServiceStats {
    service_id: i32,
    name: String,
    price: Decimal,
    duration_minutes: i32,
    frequency: u32,
    recency_weight: f64,
    last_used: NaiveDate,
}

/// Scorer for personalized barber and service recommendations
pub struct RecommendationScorer;

impl RecommendationScorer {
    /// Decay factor for a historical event, by elapsed days
    ///
    /// Biases scores toward recent behavior: 1.0 within 30 days, 0.7
    /// within 90, 0.4 within 180, 0.2 beyond.
    pub fn recency_weight(age_days: i64) -> f64 {
        if age_days <= 30 {
            1.0
        } else if age_days <= 90 {
            0.7
        } else if age_days <= 180 {
            0.4
        } else {
            0.2
        }
    }

    /// Score the customer's history into top-3 barber and service
    /// recommendations
    ///
    /// With empty history, returns up to 3 active entries from the
    /// popularity lists at a fixed score of 70. Ties keep first-seen
    /// order, so results are deterministic for a given input order.
    pub fn score(
        history: &[CompletedVisit],
        popular_barbers: &[Barber],
        popular_services: &[Service],
        now: NaiveDate,
    ) -> RecommendationSet {
        if history.is_empty() {
            return Self::popular_fallback(popular_barbers, popular_services);
        }

        RecommendationSet {
            barbers: Self::score_barbers(history, now),
            services: Self::score_services(history, now),
        }
    }

    /// Popularity fallback for customers with no completed visits
    fn popular_fallback(
        popular_barbers: &[Barber],
        popular_services: &[Service],
    ) -> RecommendationSet {
        let barbers = popular_barbers
            .iter()
            .filter(|b| b.is_active)
            .take(3)
            .map(|b| BarberRecommendation {
                barber_id: b.id,
                name: b.name.clone(),
                score: POPULAR_SCORE,
                reason: "Popular".to_string(),
                usage_count: 0,
                last_used: None,
            })
            .collect();

        let services = popular_services
            .iter()
            .filter(|s| s.is_active)
            .take(3)
            .map(|s| ServiceRecommendation {
                service_id: s.id,
                name: s.name.clone(),
                price: s.price,
                duration_minutes: s.duration_minutes,
                score: POPULAR_SCORE,
                reason: "Serviço popular".to_string(),
                usage_count: 0,
                last_used: None,
            })
            .collect();

        RecommendationSet { barbers, services }
    }

    /// Group visits by barber and blend frequency (50), recency (30), and
    /// spend (20) into a score
    fn score_barbers(history: &[CompletedVisit], now: NaiveDate) -> Vec<BarberRecommendation> {
        let mut stats: Vec<BarberStats> = Vec::new();

        for visit in history {
            let weight = Self::recency_weight((now - visit.date).num_days());
            let spent = visit.final_price.to_f64().unwrap_or(0.0);

            match stats.iter_mut().find(|s| s.barber_id == visit.barber_id) {
                Some(entry) => {
                    entry.frequency += 1;
                    entry.recency_weight += weight;
                    entry.total_spent += spent;
                    entry.last_used = entry.last_used.max(visit.date);
                }
                None => stats.push(BarberStats {
                    barber_id: visit.barber_id,
                    name: visit.barber_name.clone(),
                    frequency: 1,
                    recency_weight: weight,
                    total_spent: spent,
                    last_used: visit.date,
                }),
            }
        }

        let max_frequency = stats.iter().map(|s| s.frequency).max().unwrap_or(0);
        let max_recency = stats.iter().map(|s| s.recency_weight).fold(0.0, f64::max);
        let max_spent = stats.iter().map(|s| s.total_spent).fold(0.0, f64::max);

        let mut recommendations: Vec<BarberRecommendation> = stats
            .into_iter()
            .map(|s| {
                let score = (50.0 * normalized(s.frequency as f64, max_frequency as f64)
                    + 30.0 * normalized(s.recency_weight, max_recency)
                    + 20.0 * normalized(s.total_spent, max_spent))
                .round() as i32;

                let reason = if s.frequency >= 3 {
                    format!("Booked {} times", s.frequency)
                } else if s.recency_weight > 0.7 {
                    "Visited recently".to_string()
                } else {
                    "Based on your booking history".to_string()
                };

                BarberRecommendation {
                    barber_id: s.barber_id,
                    name: s.name,
                    score,
                    reason,
                    usage_count: s.frequency,
                    last_used: Some(s.last_used),
                }
            })
            .collect();

        // Stable sort keeps first-seen order on ties
        recommendations.sort_by(|a, b| b.score.cmp(&a.score));
        recommendations.truncate(3);
        recommendations
    }

    /// Group service line items (per occurrence in the flattened list) and
    /// blend frequency (60) and recency (40) into a score
    fn score_services(history: &[CompletedVisit], now: NaiveDate) -> Vec<ServiceRecommendation> {
        let mut stats: Vec<ServiceStats> = Vec::new();

        for visit in history {
            let weight = Self::recency_weight((now - visit.date).num_days());

            for line in &visit.services {
                match stats.iter_mut().find(|s| s.service_id == line.service_id) {
                    Some(entry) => {
                        entry.frequency += 1;
                        entry.recency_weight += weight;
                        if visit.date >= entry.last_used {
                            // Keep the most recent snapshot for display
                            entry.last_used = visit.date;
                            entry.name = line.name.clone();
                            entry.price = line.price;
                            entry.duration_minutes = line.duration_minutes;
                        }
                    }
                    None => stats.push(ServiceStats {
                        service_id: line.service_id,
                        name: line.name.clone(),
                        price: line.price,
                        duration_minutes: line.duration_minutes,
                        frequency: 1,
                        recency_weight: weight,
                        last_used: visit.date,
                    }),
                }
            }
        }

        let max_frequency = stats.iter().map(|s| s.frequency).max().unwrap_or(0);
        let max_recency = stats.iter().map(|s| s.recency_weight).fold(0.0, f64::max);

        let mut recommendations: Vec<ServiceRecommendation> = stats
            .into_iter()
            .map(|s| {
                let score = (60.0 * normalized(s.frequency as f64, max_frequency as f64)
                    + 40.0 * normalized(s.recency_weight, max_recency))
                .round() as i32;

                let reason = if s.frequency >= 5 {
                    format!("Used {} times", s.frequency)
                } else if s.frequency >= 2 {
                    format!("Used {}x", s.frequency)
                } else {
                    "You liked this service".to_string()
                };

                ServiceRecommendation {
                    service_id: s.service_id,
                    name: s.name,
                    price: s.price,
                    duration_minutes: s.duration_minutes,
                    score,
                    reason,
                    usage_count: s.frequency,
                    last_used: Some(s.last_used),
                }
            })
            .collect();

        recommendations.sort_by(|a, b| b.score.cmp(&a.score));
        recommendations.truncate(3);
        recommendations
    }
}

/// Normalize a value against the group maximum; a zero maximum contributes
/// nothing instead of dividing by zero
fn normalized(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        value / max
    } else {
        0.0
    }
}
