//! Fixed training set for the quality classifier

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleLabel {
    Bad,
    Good,
}

impl SampleLabel {
    /// Class index used by the forest: 0 = bad, 1 = good
    pub fn class_index(self) -> usize {
        match self {
            SampleLabel::Bad => 0,
            SampleLabel::Good => 1,
        }
    }

    pub fn from_class_index(index: usize) -> Self {
        if index == 1 {
            SampleLabel::Good
        } else {
            SampleLabel::Bad
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TrainingSample {
    pub code: &'static str,
    pub label: SampleLabel,
}

const fn good(code: &'static str) -> TrainingSample {
    TrainingSample {
        code,
        label: SampleLabel::Good,
    }
}

const fn bad(code: &'static str) -> TrainingSample {
    TrainingSample {
        code,
        label: SampleLabel::Bad,
    }
}

pub const TRAINING_SAMPLES: [TrainingSample; 20] = [
    good("def calculate_sum(numbers): return sum(numbers)"),
    good("class DataProcessor:\n    def __init__(self):\n        self.data = []"),
    good("def validate_email(email: str) -> bool:\n    return '@' in email"),
    good("import logging\nlogger = logging.getLogger(__name__)"),
    good("def process_data(data: list) -> dict:\n    result = {}\n    return result"),
    bad("def f(x): return x+x+x+x+x+x"),
    bad("a=1;b=2;c=3;d=4;e=5;f=6"),
    bad("def foo():\n    if True:\n        if True:\n            if True:\n                pass"),
    bad("x = 12345678; y = 98765432"),
    bad("def function(a,b,c,d,e,f,g,h,i): pass"),
    good("def well_named_function():\n    '''Docstring'''\n    pass"),
    good("class MyClass:\n    '''Class docstring'''\n    pass"),
    good("# This is a helpful comment\nresult = process_input(data)"),
    good("try:\n    risky_operation()\nexcept Exception as e:\n    handle_error(e)"),
    good("with open('file.txt') as f:\n    content = f.read()"),
    bad("def a(): pass\ndef b(): pass\ndef c(): pass"),
    bad("x=1;y=2;z=3;a=4;b=5;c=6;d=7"),
    bad("global var1, var2, var3, var4"),
    bad("eval(user_input)"),
    bad("except: pass"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_labels() {
        let good = TRAINING_SAMPLES
            .iter()
            .filter(|s| s.label == SampleLabel::Good)
            .count();
        assert_eq!(good, 10);
        assert_eq!(TRAINING_SAMPLES.len() - good, 10);
    }

    #[test]
    fn test_class_index_round_trip() {
        for label in [SampleLabel::Bad, SampleLabel::Good] {
            assert_eq!(SampleLabel::from_class_index(label.class_index()), label);
        }
    }
}
