//! Health guidance shown alongside a result.

use crate::{BmiResult, SimpleCategory};

/// Headline assessment for a category
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub title: &'static str,
    pub summary: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
}

/// How far a weight is from the ideal range
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WeightAdjustment {
    Gain(f64),
    Lose(f64),
    None,
}

pub fn status(category: SimpleCategory) -> Status {
    match category {
        SimpleCategory::Underweight => Status {
            title: "You are Underweight",
            summary: "Your BMI indicates you may be underweight. This could be associated with \
                      nutritional deficiencies, weakened immunity, and other health concerns. \
                      Consider consulting a healthcare professional.",
        },
        SimpleCategory::Normal => Status {
            title: "Healthy Weight",
            summary: "Your BMI falls within the healthy range. Maintaining this weight reduces \
                      your risk of developing serious health conditions.",
        },
        SimpleCategory::Overweight => Status {
            title: "You are Overweight",
            summary: "Your BMI suggests you are overweight. This may increase your risk of heart \
                      disease, type 2 diabetes, and high blood pressure. Small lifestyle changes \
                      can make a big difference.",
        },
        SimpleCategory::Obese => Status {
            title: "Obesity Detected",
            summary: "Your BMI indicates obesity, which significantly increases the risk of heart \
                      disease, diabetes, and joint problems. Please consult a healthcare \
                      professional for personalized guidance.",
        },
    }
}

const GENERAL: [Recommendation; 3] = [
    Recommendation {
        title: "Stay Hydrated",
        description: "Drink at least 8 glasses (2L) of water daily to support metabolism and overall health.",
    },
    Recommendation {
        title: "Quality Sleep",
        description: "Aim for 7-9 hours of quality sleep each night to support hormonal balance and recovery.",
    },
    Recommendation {
        title: "Mental Wellness",
        description: "Practice stress management through meditation, deep breathing, or mindfulness exercises.",
    },
];

const UNDERWEIGHT: [Recommendation; 3] = [
    Recommendation {
        title: "Increase Caloric Intake",
        description: "Focus on nutrient-dense foods like nuts, avocados, whole grains, and lean proteins to gain weight healthily.",
    },
    Recommendation {
        title: "Strength Training",
        description: "Incorporate resistance exercises to build muscle mass. Focus on compound movements like squats and deadlifts.",
    },
    Recommendation {
        title: "Regular Check-ups",
        description: "Visit your doctor to rule out underlying conditions that may be causing low weight.",
    },
];

const NORMAL: [Recommendation; 3] = [
    Recommendation {
        title: "Balanced Diet",
        description: "Continue eating a balanced diet rich in fruits, vegetables, lean proteins, and whole grains.",
    },
    Recommendation {
        title: "Stay Active",
        description: "Maintain at least 150 minutes of moderate exercise per week to keep your body in great shape.",
    },
    Recommendation {
        title: "Preventive Care",
        description: "Schedule regular health screenings and maintain your healthy habits for long-term wellness.",
    },
];

// Shared by Overweight and Obese
const REDUCE: [Recommendation; 3] = [
    Recommendation {
        title: "Mindful Eating",
        description: "Reduce processed foods and sugary drinks. Focus on portion control and whole, unprocessed foods.",
    },
    Recommendation {
        title: "Regular Exercise",
        description: "Start with 30 minutes of moderate activity daily. Walking, swimming, or cycling are excellent choices.",
    },
    Recommendation {
        title: "Medical Consultation",
        description: "Consult with a healthcare provider to create a safe, personalized weight management plan.",
    },
];

/// Category-specific recommendations followed by the general ones
pub fn recommendations(category: SimpleCategory) -> Vec<Recommendation> {
    let specific: &[Recommendation] = match category {
        SimpleCategory::Underweight => &UNDERWEIGHT,
        SimpleCategory::Normal => &NORMAL,
        SimpleCategory::Overweight | SimpleCategory::Obese => &REDUCE,
    };
    specific.iter().chain(GENERAL.iter()).cloned().collect()
}

impl BmiResult {
    pub fn simple_category(&self) -> SimpleCategory {
        self.category.simple()
    }

    pub fn gauge_position(&self) -> f64 {
        crate::category::gauge_position(self.bmi)
    }

    /// Weight change needed to reach the ideal range
    ///
    /// No adjustment inside the Normal category, even though the ideal
    /// range stops at BMI 24.9.
    pub fn weight_adjustment(&self, weight_kg: f64) -> WeightAdjustment {
        if self.simple_category() == SimpleCategory::Normal {
            WeightAdjustment::None
        } else if self.bmi < crate::formula::IDEAL_BMI_MIN {
            WeightAdjustment::Gain(self.ideal_weight_min - weight_kg)
        } else {
            WeightAdjustment::Lose(weight_kg - self.ideal_weight_max)
        }
    }
}
