use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MEDBRIEF_MODEL_SOURCE") {
            if matches!(v.as_str(), "huggingface" | "local") {
                self.model.source = v;
            } else {
                tracing::warn!("ignoring invalid MEDBRIEF_MODEL_SOURCE value: {v}");
            }
        }
        if let Ok(v) = std::env::var("MEDBRIEF_MODEL_REPO") {
            self.model.repo_id = v;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_MODEL_REVISION") {
            self.model.revision = v;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_MODEL_LOCAL_PATH") {
            self.model.local_path = v;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_DEVICE") {
            self.model.device = v;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_TASK_PREFIX") {
            self.model.task_prefix = v;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_MAX_INPUT_TOKENS")
            && let Ok(tokens) = v.parse::<usize>()
        {
            self.model.max_input_tokens = tokens;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_NUM_BEAMS")
            && let Ok(beams) = v.parse::<usize>()
        {
            self.model.generation.num_beams = beams;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_LENGTH_PENALTY")
            && let Ok(penalty) = v.parse::<f64>()
        {
            self.model.generation.length_penalty = penalty;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_EARLY_STOPPING")
            && let Ok(flag) = v.parse::<bool>()
        {
            self.model.generation.early_stopping = flag;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_MIN_LENGTH")
            && let Ok(len) = v.parse::<usize>()
        {
            self.model.generation.min_length = len;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_MAX_LENGTH")
            && let Ok(len) = v.parse::<usize>()
        {
            self.model.generation.max_length = len;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_CHUNK_SIZE")
            && let Ok(size) = v.parse::<usize>()
        {
            self.chunking.chunk_size = size;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_STRIDE")
            && let Ok(stride) = v.parse::<usize>()
        {
            self.chunking.stride = stride;
        }
        if let Ok(v) = std::env::var("MEDBRIEF_MAX_FILE_SIZE")
            && let Ok(size) = v.parse::<u64>()
        {
            self.limits.max_file_size = size;
        }
    }
}
