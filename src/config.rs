//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Canvas configuration.
pub struct CanvasConfig {
    /// Percentage the render target is divided by before layout; `200` halves the logical size.
    pub ui_scale: i32,
}

impl Default for CanvasConfig {
    fn default() -> Self { Self { ui_scale: 100 } }
}

impl CanvasConfig {
    /// Returns a copy with a different UI scale.
    pub fn with_ui_scale(mut self, ui_scale: i32) -> Self {
        self.ui_scale = ui_scale;
        self
    }

    /// Rejects non-positive scales.
    pub fn validate(&self) -> Result<(), NuiError> {
        if self.ui_scale <= 0 {
            return Err(NuiError::InvalidUiScale(self.ui_scale));
        }
        Ok(())
    }

    /// Logical canvas size for a render target of `target` pixels.
    pub fn logical_size(&self, target: Dimensioni) -> Dimensioni {
        let scale = self.ui_scale.max(1) as i64;
        let w = target.width as i64 * 100 / scale;
        let h = target.height as i64 * 100 / scale;
        Dimensioni::new(w.clamp(0, i32::MAX as i64) as i32, h.clamp(0, i32::MAX as i64) as i32)
    }
}
