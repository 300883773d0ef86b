//! 계산 서버로 보내는 요청 본문.
//!
//! 각 변형은 필요한 필드만 가지므로 서버에 보내기 전 필드 존재 여부를
//! 따로 확인할 필요가 없다.

use serde::Serialize;

/// 기본 계산기의 계산 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationType {
    Power,
    Resistance,
    Voltage,
    Current,
    Energy,
}

impl CalculationType {
    pub const ALL: [CalculationType; 5] = [
        CalculationType::Power,
        CalculationType::Resistance,
        CalculationType::Voltage,
        CalculationType::Current,
        CalculationType::Energy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculationType::Power => "power",
            CalculationType::Resistance => "resistance",
            CalculationType::Voltage => "voltage",
            CalculationType::Current => "current",
            CalculationType::Energy => "energy",
        }
    }

    /// 결과 값 뒤에 붙는 단위 (앞의 공백 포함).
    pub fn unit_suffix(&self) -> &'static str {
        match self {
            CalculationType::Power => " W",
            CalculationType::Resistance => " Ω",
            CalculationType::Voltage => " V",
            CalculationType::Current => " A",
            CalculationType::Energy => " J",
        }
    }

    /// 이 계산에 필요한 두 입력 칸.
    pub fn inputs(&self) -> [InputField; 2] {
        match self {
            CalculationType::Power | CalculationType::Resistance => {
                [InputField::Voltage, InputField::Current]
            }
            CalculationType::Voltage => [InputField::Power, InputField::Current],
            CalculationType::Current => [InputField::Power, InputField::Voltage],
            CalculationType::Energy => [InputField::Power, InputField::Time],
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            CalculationType::Power => 0,
            CalculationType::Resistance => 1,
            CalculationType::Voltage => 2,
            CalculationType::Current => 3,
            CalculationType::Energy => 4,
        }
    }
}

/// 기본 계산기 입력 칸의 물리량.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    Voltage,
    Current,
    Power,
    Time,
}

impl InputField {
    pub fn label(&self) -> &'static str {
        match self {
            InputField::Voltage => "Voltage (V)",
            InputField::Current => "Current (A)",
            InputField::Power => "Power (W)",
            InputField::Time => "Time (s)",
        }
    }
}

/// `POST /calculate` 본문.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CalculationRequest {
    Power { voltage: f64, current: f64 },
    Resistance { voltage: f64, current: f64 },
    Voltage { power: f64, current: f64 },
    Current { power: f64, voltage: f64 },
    Energy { power: f64, time: f64 },
}

impl CalculationRequest {
    /// 계산 종류와 `CalculationType::inputs` 순서의 두 값으로 요청을 만든다.
    pub fn new(kind: CalculationType, first: f64, second: f64) -> Self {
        match kind {
            CalculationType::Power => CalculationRequest::Power {
                voltage: first,
                current: second,
            },
            CalculationType::Resistance => CalculationRequest::Resistance {
                voltage: first,
                current: second,
            },
            CalculationType::Voltage => CalculationRequest::Voltage {
                power: first,
                current: second,
            },
            CalculationType::Current => CalculationRequest::Current {
                power: first,
                voltage: second,
            },
            CalculationType::Energy => CalculationRequest::Energy {
                power: first,
                time: second,
            },
        }
    }

    pub fn kind(&self) -> CalculationType {
        match self {
            CalculationRequest::Power { .. } => CalculationType::Power,
            CalculationRequest::Resistance { .. } => CalculationType::Resistance,
            CalculationRequest::Voltage { .. } => CalculationType::Voltage,
            CalculationRequest::Current { .. } => CalculationType::Current,
            CalculationRequest::Energy { .. } => CalculationType::Energy,
        }
    }
}

/// `POST /solve_circuit` 본문.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "circuit_type", rename_all = "lowercase")]
pub enum CircuitRequest {
    Dc(DcCircuit),
    Ac(AcCircuit),
}

/// DC 회로 구성별 요청.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "configuration", rename_all = "snake_case")]
pub enum DcCircuit {
    Series {
        voltage_source: f64,
        resistances: Vec<f64>,
    },
    Parallel {
        voltage_source: f64,
        resistances: Vec<f64>,
    },
    VoltageDivider {
        voltage_source: f64,
        r1: f64,
        r2: f64,
    },
}

/// AC 회로 구성별 요청. 커패시턴스는 μF, 인덕턴스는 mH 단위로 보낸다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "configuration", rename_all = "lowercase")]
pub enum AcCircuit {
    Rc {
        voltage_source: f64,
        frequency: f64,
        resistance: f64,
        capacitance: f64,
    },
    Rl {
        voltage_source: f64,
        frequency: f64,
        resistance: f64,
        inductance: f64,
    },
    Rlc {
        voltage_source: f64,
        frequency: f64,
        resistance: f64,
        capacitance: f64,
        inductance: f64,
    },
}
