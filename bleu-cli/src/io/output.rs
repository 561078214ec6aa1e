use bleu::io::ext_repr::{ExtInstance, ExtSolution};
use bleu::util::BleuConfig;
use serde::{Deserialize, Serialize};

/// Contents of a solution file: the instance, its solution and the configuration used
#[derive(Serialize, Deserialize, Clone)]
pub struct Output {
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: BleuConfig,
}
