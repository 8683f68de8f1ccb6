mod export;
mod tolerance;
